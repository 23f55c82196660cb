//! Session cookie store

use psso_common::security::{KeychainError, KeychainProvider, SecretStore};
use psso_core::CookieStore;
use psso_domain::{Cookie, KeychainConfig, PssoError, Result};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// Forwarded cookies persisted as a JSON array under one keychain account
#[derive(Debug, Clone)]
pub struct KeychainCookieStore<S = KeychainProvider> {
    store: S,
    account: String,
}

impl KeychainCookieStore<KeychainProvider> {
    #[must_use]
    pub fn from_config(config: &KeychainConfig) -> Self {
        Self::new(KeychainProvider::new(config.service.clone()), config.cookie_account.clone())
    }
}

impl<S: SecretStore> KeychainCookieStore<S> {
    pub fn new(store: S, account: impl Into<String>) -> Self {
        Self { store, account: account.into() }
    }
}

impl<S: SecretStore> CookieStore for KeychainCookieStore<S> {
    fn save_cookies(&self, cookies: &[Cookie]) -> Result<()> {
        let payload = serde_json::to_string(cookies)
            .map_err(|e| PssoError::from(InfraError::from(KeychainError::from(e))))?;

        self.store
            .replace_secret(&self.account, &payload)
            .map_err(|e| PssoError::from(InfraError::from(e)))?;

        debug!(account = %self.account, cookie_count = cookies.len(), "Session cookies stored");
        Ok(())
    }

    fn load_cookies(&self) -> Vec<Cookie> {
        match self.store.get_secret(&self.account) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(account = %self.account, error = %err, "Stored cookies are corrupt, ignoring");
                Vec::new()
            }),
            Err(KeychainError::NotFound) => Vec::new(),
            Err(err) => {
                warn!(account = %self.account, error = %err, "Session cookies could not be read");
                Vec::new()
            }
        }
    }
}
