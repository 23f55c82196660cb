//! Port interfaces for the authorization flow
//!
//! These traits define the boundaries between the request state machine and
//! the keychain, HTTP and host-UI implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use psso_domain::{AuthorizationOutcome, Cookie, ProviderConfig, Result, TokenPair};
use url::Url;

/// Single-slot persistence for the token pair
pub trait TokenStore: Send + Sync {
    /// Replace the stored pair. Last write wins.
    fn save(&self, pair: &TokenPair) -> Result<()>;

    /// Stored pair, or `None` when absent or unreadable
    fn load(&self) -> Option<TokenPair>;
}

/// Persistence for session cookies forwarded from the browser
pub trait CookieStore: Send + Sync {
    fn save_cookies(&self, cookies: &[Cookie]) -> Result<()>;

    /// Stored cookies; empty when absent or unreadable
    fn load_cookies(&self) -> Vec<Cookie>;
}

/// Outbound token-endpoint operations
///
/// Both calls are one-shot; callers decide whether to fall back.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Redeem an authorization code (`grant_type=authorization_code`).
    async fn exchange_code(
        &self,
        config: &ProviderConfig,
        code: &str,
        code_verifier: &str,
        redirect_uri: &str,
    ) -> Result<TokenPair>;

    /// Mint a new pair from a refresh token (`grant_type=refresh_token`).
    ///
    /// The returned pair keeps `refresh_token` when the server does not
    /// rotate it.
    async fn refresh(&self, config: &ProviderConfig, refresh_token: &str) -> Result<TokenPair>;
}

/// The host-side request a `PendingAuthorization` completes
#[async_trait]
pub trait AuthorizationHost: Send + Sync {
    /// Show the browser surface for `url`.
    async fn present_authorization_view(&self, url: Option<&Url>) -> Result<()>;

    /// Deliver the terminal outcome.
    fn complete(&self, outcome: AuthorizationOutcome);
}

/// Time source for cache validity decisions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation of [`Clock`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
