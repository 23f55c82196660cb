//! Application configuration structures
//!
//! Host-supplied provider settings arrive per request and are not part of
//! this configuration; see [`crate::ProviderSettings`].

use serde::{Deserialize, Serialize};

use crate::constants::{COOKIE_ACCOUNT, DEFAULT_TOKEN_TIMEOUT_SECS, KEYCHAIN_SERVICE, TOKEN_ACCOUNT};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PssoConfig {
    pub token_endpoint: TokenEndpointConfig,
    pub keychain: KeychainConfig,
    pub logging: LoggingConfig,
}

/// Outbound token-endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenEndpointConfig {
    /// Per-call timeout in seconds
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
}

impl Default for TokenEndpointConfig {
    fn default() -> Self {
        Self { timeout_seconds: DEFAULT_TOKEN_TIMEOUT_SECS, user_agent: None }
    }
}

/// Secure store slot naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeychainConfig {
    pub service: String,
    pub token_account: String,
    pub cookie_account: String,
}

impl Default for KeychainConfig {
    fn default() -> Self {
        Self {
            service: KEYCHAIN_SERVICE.to_string(),
            token_account: TOKEN_ACCOUNT.to_string(),
            cookie_account: COOKIE_ACCOUNT.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "psso=info".to_string(), json: false }
    }
}
