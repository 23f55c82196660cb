//! Provider configuration resolver
//!
//! Turns the host's [`ProviderSettings`] into a [`ProviderConfig`]. Settings
//! missing a usable issuer, authorize endpoint, token endpoint or client id
//! are replaced wholesale by the built-in provider.

use psso_domain::constants::{
    DEFAULT_AUTHORIZE_ENDPOINT, DEFAULT_CLIENT_ID, DEFAULT_ISSUER, DEFAULT_SCOPES,
    DEFAULT_TOKEN_ENDPOINT,
};
use psso_domain::{ProviderConfig, ProviderSettings, PssoError, Result};
use tracing::debug;
use url::Url;

/// Resolve settings into a configuration, falling back to
/// [`builtin_default`].
///
/// # Errors
/// Returns `PssoError::ConfigurationInvalid` only if the built-in constants
/// themselves fail to parse.
pub fn resolve(settings: &ProviderSettings) -> Result<ProviderConfig> {
    if let Some(config) = from_settings(settings) {
        debug!(issuer = %config.issuer, client_id = %config.client_id, "Using host provider settings");
        return Ok(config);
    }

    debug!("Provider settings incomplete, using built-in provider");
    builtin_default()
}

/// Built-in provider: fixed issuer, endpoints and client id, default scopes,
/// no secret and no redirect override.
///
/// # Errors
/// Returns `PssoError::ConfigurationInvalid` if a built-in URL is malformed
pub fn builtin_default() -> Result<ProviderConfig> {
    Ok(ProviderConfig {
        issuer: parse_constant(DEFAULT_ISSUER)?,
        authorize_endpoint: parse_constant(DEFAULT_AUTHORIZE_ENDPOINT)?,
        token_endpoint: parse_constant(DEFAULT_TOKEN_ENDPOINT)?,
        scopes: DEFAULT_SCOPES.to_string(),
        client_id: DEFAULT_CLIENT_ID.to_string(),
        client_secret: None,
        redirect_uri: None,
    })
}

fn from_settings(settings: &ProviderSettings) -> Option<ProviderConfig> {
    let issuer = parse_absolute(settings.issuer.as_deref())?;
    let authorize_endpoint = parse_absolute(settings.authorize.as_deref())?;
    let token_endpoint = parse_absolute(settings.token.as_deref())?;
    let client_id = non_empty(settings.client_id.as_deref())?.to_string();

    let scopes = non_empty(settings.scopes.as_deref()).unwrap_or(DEFAULT_SCOPES).to_string();

    Some(ProviderConfig {
        issuer,
        authorize_endpoint,
        token_endpoint,
        scopes,
        client_id,
        client_secret: settings.client_secret.clone(),
        redirect_uri: settings.redirect_uri.clone(),
    })
}

/// Absolute URL with a host; anything else counts as missing.
fn parse_absolute(raw: Option<&str>) -> Option<Url> {
    let raw = non_empty(raw)?;
    Url::parse(raw).ok().filter(Url::has_host)
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_constant(raw: &str) -> Result<Url> {
    Url::parse(raw)
        .map_err(|e| PssoError::ConfigurationInvalid(format!("built-in URL {raw} is invalid: {e}")))
}
