//! Platform-SSO request handler
//!
//! The platform-SSO host variant only needs the login configuration to be
//! registered; every credential request it receives is declined so the
//! system falls back to its own handling.

use psso_domain::constants::{DEFAULT_CLIENT_ID, DEFAULT_ISSUER, PLATFORM_SSO_AUDIENCE};
use psso_domain::{AuthorizationOutcome, PssoError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::pending::AuthorizationRequest;
use super::ports::AuthorizationHost;

/// Login configuration announced to the platform-SSO host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginConfiguration {
    pub issuer: Url,
    #[serde(rename = "clientID")]
    pub client_id: String,
    pub audience: String,
    #[serde(rename = "tokenEndpointURL")]
    pub token_endpoint: Url,
}

impl LoginConfiguration {
    /// Configuration for `issuer`, with the token endpoint at
    /// `<issuer>/application/o/token/`.
    ///
    /// # Errors
    /// Returns `PssoError::ConfigurationInvalid` if the token endpoint cannot
    /// be derived from `issuer`
    pub fn for_issuer(issuer: Url, client_id: impl Into<String>) -> Result<Self> {
        let mut base = issuer.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let token_endpoint = base.join("application/o/token/").map_err(|e| {
            PssoError::ConfigurationInvalid(format!("token endpoint for {issuer}: {e}"))
        })?;

        Ok(Self {
            issuer,
            client_id: client_id.into(),
            audience: PLATFORM_SSO_AUDIENCE.to_string(),
            token_endpoint,
        })
    }

    /// Configuration of the built-in provider
    ///
    /// # Errors
    /// Returns `PssoError::ConfigurationInvalid` if the built-in issuer is
    /// malformed
    pub fn builtin() -> Result<Self> {
        let issuer = Url::parse(DEFAULT_ISSUER)
            .map_err(|e| PssoError::ConfigurationInvalid(format!("built-in issuer: {e}")))?;
        Self::for_issuer(issuer, DEFAULT_CLIENT_ID)
    }
}

/// Declining request handler for the platform-SSO extension
#[derive(Debug, Clone)]
pub struct PlatformSsoHandler {
    configuration: LoginConfiguration,
}

impl PlatformSsoHandler {
    #[must_use]
    pub fn new(configuration: LoginConfiguration) -> Self {
        Self { configuration }
    }

    #[must_use]
    pub fn configuration(&self) -> &LoginConfiguration {
        &self.configuration
    }

    /// Build the login configuration for the host and decline the request.
    pub fn begin_authorization(
        &self,
        request: &AuthorizationRequest,
        host: &dyn AuthorizationHost,
    ) -> LoginConfiguration {
        debug!(
            issuer = %self.configuration.issuer,
            url = ?request.url.as_ref().map(Url::as_str),
            "Platform SSO request declined"
        );
        host.complete(AuthorizationOutcome::NotHandled);
        self.configuration.clone()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use psso_domain::constants::DEFAULT_TOKEN_ENDPOINT;
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        outcomes: Mutex<Vec<AuthorizationOutcome>>,
    }

    #[async_trait]
    impl AuthorizationHost for RecordingHost {
        async fn present_authorization_view(&self, _url: Option<&Url>) -> Result<()> {
            Ok(())
        }

        fn complete(&self, outcome: AuthorizationOutcome) {
            self.outcomes.lock().push(outcome);
        }
    }

    #[test]
    fn builtin_configuration_matches_provider() {
        let configuration = LoginConfiguration::builtin().expect("builtin parses");

        assert_eq!(configuration.issuer.as_str(), "https://auth.argio.ch/");
        assert_eq!(configuration.token_endpoint.as_str(), DEFAULT_TOKEN_ENDPOINT);
        assert_eq!(configuration.audience, "macos");
        assert_eq!(configuration.client_id, "ch.argio.sso");
    }

    #[test]
    fn token_endpoint_appends_to_issuer_path() {
        let issuer = Url::parse("https://idp.example.com/tenant").expect("valid url");
        let configuration = LoginConfiguration::for_issuer(issuer, "client").expect("derives");

        assert_eq!(
            configuration.token_endpoint.as_str(),
            "https://idp.example.com/tenant/application/o/token/"
        );
    }

    #[test]
    fn declines_every_request() {
        let handler = PlatformSsoHandler::new(LoginConfiguration::builtin().expect("builtin parses"));
        let host = RecordingHost::default();
        let request = AuthorizationRequest::new(
            Some(Url::parse("https://auth.argio.ch/").expect("valid url")),
            json!({}),
        );

        let configuration = handler.begin_authorization(&request, &host);

        assert_eq!(&configuration, handler.configuration());
        assert_eq!(*host.outcomes.lock(), vec![AuthorizationOutcome::NotHandled]);
    }

    #[test]
    fn serializes_host_field_names() {
        let configuration = LoginConfiguration::builtin().expect("builtin parses");
        let json = serde_json::to_value(&configuration).expect("serializes");

        assert_eq!(json["clientID"], "ch.argio.sso");
        assert_eq!(json["tokenEndpointURL"], DEFAULT_TOKEN_ENDPOINT);
        assert_eq!(json["audience"], "macos");
    }
}
