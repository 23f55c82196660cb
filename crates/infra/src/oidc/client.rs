//! Token-endpoint client for the authorization-code and refresh grants
//!
//! Both grants POST `application/x-www-form-urlencoded` bodies and accept a
//! JSON object in return. Calls are one-shot; there is no retry.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use psso_core::TokenExchange;
use psso_domain::{ProviderConfig, PssoError, Result, TokenEndpointConfig, TokenPair};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::errors::InfraError;

/// RFC 6749 §5.2 error body
#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Token endpoint client backed by `reqwest`
#[derive(Debug, Clone)]
pub struct OidcTokenClient {
    client: Client,
}

impl OidcTokenClient {
    /// Build a client with the configured per-call timeout and user agent.
    ///
    /// # Errors
    /// Returns `PssoError::ConfigurationInvalid` if the HTTP client cannot be
    /// constructed
    pub fn new(config: &TokenEndpointConfig) -> Result<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| concat!("psso/", env!("CARGO_PKG_VERSION")).to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(user_agent)
            .build()
            .map_err(|e| PssoError::ConfigurationInvalid(format!("HTTP client: {e}")))?;

        Ok(Self { client })
    }

    async fn request_tokens(
        &self,
        endpoint: &Url,
        params: &[(&str, &str)],
        invalid_message: &str,
    ) -> Result<(Value, DateTime<Utc>)> {
        let response = self
            .client
            .post(endpoint.clone())
            .form(params)
            .send()
            .await
            .map_err(|e| PssoError::from(InfraError::from(e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| PssoError::from(InfraError::from(e)))?;
        let received_at = Utc::now();

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<OAuthErrorBody>(&body) {
                warn!(%status, error = %error.error, "Token endpoint rejected request");
                let message = match error.error_description {
                    Some(description) if !description.is_empty() => {
                        format!("{}: {description}", error.error)
                    }
                    _ => error.error,
                };
                return Err(PssoError::ProtocolError(message));
            }
            warn!(%status, "Token endpoint returned an error status");
            return Err(PssoError::ProtocolError(format!("{invalid_message} (HTTP {status})")));
        }

        let json = serde_json::from_str::<Value>(&body)
            .ok()
            .filter(Value::is_object)
            .ok_or_else(|| PssoError::ProtocolError(invalid_message.to_string()))?;

        Ok((json, received_at))
    }
}

/// Build a pair from a successful token response.
///
/// `fallback_refresh` is used when the response carries no refresh token.
fn token_pair_from_response(
    json: &Value,
    received_at: DateTime<Utc>,
    fallback_refresh: Option<&str>,
    invalid_message: &str,
) -> Result<TokenPair> {
    let access_token = json
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| PssoError::ProtocolError(invalid_message.to_string()))?;

    let refresh_token = json
        .get("refresh_token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .or(fallback_refresh)
        .map(String::from);

    let expires_in = json.get("expires_in").and_then(Value::as_f64);

    Ok(TokenPair::from_expires_in(access_token, refresh_token, expires_in, received_at))
}

#[async_trait]
impl TokenExchange for OidcTokenClient {
    async fn exchange_code(
        &self,
        config: &ProviderConfig,
        code: &str,
        code_verifier: &str,
        redirect_uri: &str,
    ) -> Result<TokenPair> {
        const INVALID: &str = "invalid token response";

        let mut params = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", config.client_id.as_str()),
            ("code_verifier", code_verifier),
        ];
        if let Some(secret) = config.client_secret() {
            params.push(("client_secret", secret));
        }

        debug!(
            endpoint = %config.token_endpoint,
            grant_type = "authorization_code",
            confidential = config.client_secret().is_some(),
            "Requesting tokens"
        );
        let (json, received_at) =
            self.request_tokens(&config.token_endpoint, &params, INVALID).await?;
        token_pair_from_response(&json, received_at, None, INVALID)
    }

    async fn refresh(&self, config: &ProviderConfig, refresh_token: &str) -> Result<TokenPair> {
        const INVALID: &str = "invalid refresh response";

        let mut params = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", config.client_id.as_str()),
        ];
        if let Some(secret) = config.client_secret() {
            params.push(("client_secret", secret));
        }

        debug!(
            endpoint = %config.token_endpoint,
            grant_type = "refresh_token",
            "Requesting tokens"
        );
        let (json, received_at) =
            self.request_tokens(&config.token_endpoint, &params, INVALID).await?;
        token_pair_from_response(&json, received_at, Some(refresh_token), INVALID)
    }
}
