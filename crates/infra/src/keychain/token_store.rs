//! Single-slot token store

use psso_common::security::{KeychainError, KeychainProvider, SecretStore};
use psso_core::TokenStore;
use psso_domain::{KeychainConfig, PssoError, Result, TokenPair};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// Token pair persisted as `{accessToken, refreshToken?, expiresAt?}` JSON
/// under one keychain account.
#[derive(Debug, Clone)]
pub struct KeychainTokenStore<S = KeychainProvider> {
    store: S,
    account: String,
}

impl KeychainTokenStore<KeychainProvider> {
    /// Store on the platform keychain using the configured service/account.
    #[must_use]
    pub fn from_config(config: &KeychainConfig) -> Self {
        Self::new(KeychainProvider::new(config.service.clone()), config.token_account.clone())
    }
}

impl<S: SecretStore> KeychainTokenStore<S> {
    pub fn new(store: S, account: impl Into<String>) -> Self {
        Self { store, account: account.into() }
    }

    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }
}

impl<S: SecretStore> TokenStore for KeychainTokenStore<S> {
    fn save(&self, pair: &TokenPair) -> Result<()> {
        let payload = serde_json::to_string(pair)
            .map_err(|e| PssoError::from(InfraError::from(KeychainError::from(e))))?;

        self.store
            .replace_secret(&self.account, &payload)
            .map_err(|e| PssoError::from(InfraError::from(e)))?;

        debug!(
            account = %self.account,
            has_refresh_token = pair.refresh_token.is_some(),
            expires_at = ?pair.expires_at,
            "Token pair stored"
        );
        Ok(())
    }

    fn load(&self) -> Option<TokenPair> {
        let raw = match self.store.get_secret(&self.account) {
            Ok(raw) => raw,
            Err(KeychainError::NotFound) => {
                debug!(account = %self.account, "No stored token pair");
                return None;
            }
            Err(err) => {
                warn!(account = %self.account, error = %err, "Token pair could not be read");
                return None;
            }
        };

        match serde_json::from_str::<TokenPair>(&raw) {
            Ok(pair) => Some(pair),
            Err(err) => {
                warn!(account = %self.account, error = %err, "Stored token pair is corrupt, ignoring");
                None
            }
        }
    }
}
