//! Authorization context - dependency injection container

use std::sync::Arc;

use psso_common::security::{KeychainProvider, SecretStore};
use psso_core::{
    AuthorizationService, CookieStore, LoginConfiguration, PlatformSsoHandler, TokenExchange,
    TokenStore,
};
use psso_domain::{PssoConfig, Result};

use crate::keychain::{KeychainCookieStore, KeychainTokenStore};
use crate::oidc::OidcTokenClient;

/// Holds the configuration and the wired authorization service
pub struct AuthContext {
    pub config: PssoConfig,
    pub service: Arc<AuthorizationService>,
    pub platform_sso: Arc<PlatformSsoHandler>,
}

impl AuthContext {
    /// Wire the platform keychain and the `reqwest` token client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: PssoConfig) -> Result<Self> {
        let store = KeychainProvider::new(config.keychain.service.clone());
        Self::with_secret_store(config, store)
    }

    /// Wire against an arbitrary secret store.
    ///
    /// Token and cookie accounts share `store`, so it must be cheap to clone
    /// and clones must see the same backing data.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_secret_store<S>(config: PssoConfig, store: S) -> Result<Self>
    where
        S: SecretStore + Clone + 'static,
    {
        let exchange: Arc<dyn TokenExchange> =
            Arc::new(OidcTokenClient::new(&config.token_endpoint)?);
        let tokens: Arc<dyn TokenStore> =
            Arc::new(KeychainTokenStore::new(store.clone(), config.keychain.token_account.clone()));
        let cookies: Arc<dyn CookieStore> =
            Arc::new(KeychainCookieStore::new(store, config.keychain.cookie_account.clone()));

        tracing::info!(
            service = %config.keychain.service,
            token_account = %config.keychain.token_account,
            "Authorization context ready"
        );

        Ok(Self {
            service: Arc::new(AuthorizationService::new(tokens, cookies, exchange)),
            platform_sso: Arc::new(PlatformSsoHandler::new(LoginConfiguration::builtin()?)),
            config,
        })
    }

    #[must_use]
    pub fn service(&self) -> Arc<AuthorizationService> {
        Arc::clone(&self.service)
    }
}
