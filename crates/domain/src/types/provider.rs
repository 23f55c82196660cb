//! Identity provider configuration
//!
//! [`ProviderSettings`] is the raw, untyped view of the host's settings bag.
//! [`ProviderConfig`] is the validated form the rest of the system uses.

use std::fmt;

use serde_json::Value;
use url::Url;

use crate::constants::{ADDITIONAL_SETTINGS_KEY, DEFAULT_REDIRECT_URI, PLATFORM_ISSUER_KEY};

/// Raw provider settings as delivered by the host
///
/// Every field is optional at the source. Values of the wrong JSON type are
/// treated as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderSettings {
    pub issuer: Option<String>,
    pub authorize: Option<String>,
    pub token: Option<String>,
    pub scopes: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

impl ProviderSettings {
    /// Read the settings out of the host's `providerConfiguration` dictionary.
    ///
    /// Fields live under `AdditionalSettings`; the issuer falls back to the
    /// top-level platform issuer key.
    #[must_use]
    pub fn from_provider_configuration(configuration: &Value) -> Self {
        let additional = configuration.get(ADDITIONAL_SETTINGS_KEY);
        let field = |key: &str| -> Option<String> {
            additional.and_then(|settings| settings.get(key)).and_then(Value::as_str).map(String::from)
        };

        let issuer = field("issuer").or_else(|| {
            configuration.get(PLATFORM_ISSUER_KEY).and_then(Value::as_str).map(String::from)
        });

        Self {
            issuer,
            authorize: field("authorize"),
            token: field("token"),
            scopes: field("scopes"),
            client_id: field("client_id"),
            client_secret: field("client_secret"),
            redirect_uri: field("redirect_uri"),
        }
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("issuer", &self.issuer)
            .field("authorize", &self.authorize)
            .field("token", &self.token)
            .field("scopes", &self.scopes)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Validated OIDC provider configuration
///
/// Immutable once resolved for a request.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub issuer: Url,
    pub authorize_endpoint: Url,
    pub token_endpoint: Url,
    /// Space-separated scopes
    pub scopes: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

impl ProviderConfig {
    #[must_use]
    pub fn issuer_host(&self) -> Option<&str> {
        self.issuer.host_str()
    }

    /// Configured redirect URI, or the fixed OIDC callback when unset or empty.
    #[must_use]
    pub fn effective_redirect_uri(&self) -> &str {
        self.redirect_uri.as_deref().filter(|uri| !uri.is_empty()).unwrap_or(DEFAULT_REDIRECT_URI)
    }

    /// Client secret, ignoring empty strings
    #[must_use]
    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref().filter(|secret| !secret.is_empty())
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("issuer", &self.issuer.as_str())
            .field("authorize_endpoint", &self.authorize_endpoint.as_str())
            .field("token_endpoint", &self.token_endpoint.as_str())
            .field("scopes", &self.scopes)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}
