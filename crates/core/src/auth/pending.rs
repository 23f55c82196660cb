//! In-flight authorization request handle
//!
//! A [`PendingAuthorization`] owns everything scoped to one host request: the
//! host handle, the resolved provider configuration, the URL shown in the
//! browser, the PKCE pair and the redirect URI. Completion takes `self` by
//! value, so a handle can deliver at most one outcome.

use std::fmt;
use std::sync::Arc;

use psso_common::auth::PkcePair;
use psso_domain::constants::FALLBACK_RESPONSE_URL;
use psso_domain::{
    AuthorizationOutcome, AuthorizationResponse, ProviderConfig, ProviderSettings, PssoError,
    Result,
};
use serde_json::Value;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::ports::AuthorizationHost;

/// Inbound credential request as delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationRequest {
    /// URL the caller wants a credential for
    pub url: Option<Url>,
    /// Opaque `providerConfiguration` settings bag
    pub provider_configuration: Value,
}

impl AuthorizationRequest {
    #[must_use]
    pub fn new(url: Option<Url>, provider_configuration: Value) -> Self {
        Self { url, provider_configuration }
    }

    #[must_use]
    pub fn settings(&self) -> ProviderSettings {
        ProviderSettings::from_provider_configuration(&self.provider_configuration)
    }

    /// Host of the requested URL
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.url.as_ref().and_then(Url::host_str)
    }
}

pub struct PendingAuthorization {
    id: Uuid,
    request: AuthorizationRequest,
    host: Arc<dyn AuthorizationHost>,
    config: ProviderConfig,
    redirect_uri: String,
    target_url: Option<Url>,
    pkce: Option<PkcePair>,
}

impl PendingAuthorization {
    pub fn new(
        request: AuthorizationRequest,
        host: Arc<dyn AuthorizationHost>,
        config: ProviderConfig,
    ) -> Self {
        let redirect_uri = config.effective_redirect_uri().to_string();
        Self {
            id: Uuid::new_v4(),
            request,
            host,
            config,
            redirect_uri,
            target_url: None,
            pkce: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn request(&self) -> &AuthorizationRequest {
        &self.request
    }

    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// URL loaded into the browser surface, once interactive setup ran
    #[must_use]
    pub fn target_url(&self) -> Option<&Url> {
        self.target_url.as_ref()
    }

    #[must_use]
    pub fn has_pkce(&self) -> bool {
        self.pkce.is_some()
    }

    /// Record the interactive target and its PKCE pair, replacing any
    /// previous pair.
    pub fn attach_interactive(&mut self, target_url: Option<Url>, pkce: Option<PkcePair>) {
        self.target_url = target_url;
        self.pkce = pkce;
    }

    /// Remove the PKCE pair. A second call returns `None`.
    pub fn take_pkce(&mut self) -> Option<PkcePair> {
        self.pkce.take()
    }

    /// URL reported on synthesized responses: the browser target, else the
    /// requested URL, else a localhost placeholder.
    ///
    /// # Errors
    /// Returns `PssoError::ConfigurationInvalid` if the placeholder fails to
    /// parse
    pub fn response_url(&self) -> Result<Url> {
        if let Some(url) = self.target_url.as_ref().or(self.request.url.as_ref()) {
            return Ok(url.clone());
        }
        Url::parse(FALLBACK_RESPONSE_URL).map_err(|e| {
            PssoError::ConfigurationInvalid(format!("fallback response URL is invalid: {e}"))
        })
    }

    /// Deliver `outcome` to the host and drop the handle.
    pub fn complete(self, outcome: AuthorizationOutcome) {
        debug!(
            request_id = %self.id,
            completed = outcome.is_completed(),
            "Completing authorization request"
        );
        self.host.complete(outcome);
    }

    /// Complete with `200` and `Authorization: Bearer <access_token>`.
    pub fn complete_with_bearer(self, access_token: &str) {
        match self.response_url() {
            Ok(url) => {
                let response = AuthorizationResponse::bearer(url, access_token);
                self.complete(AuthorizationOutcome::Completed(response));
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn fail(self, error: PssoError) {
        self.complete(AuthorizationOutcome::Failed(error));
    }

    /// Explicit decline; the host falls back to default handling.
    pub fn decline(self) {
        self.complete(AuthorizationOutcome::NotHandled);
    }
}

impl fmt::Debug for PendingAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAuthorization")
            .field("id", &self.id)
            .field("request_url", &self.request.url.as_ref().map(Url::as_str))
            .field("issuer", &self.config.issuer.as_str())
            .field("redirect_uri", &self.redirect_uri)
            .field("target_url", &self.target_url.as_ref().map(Url::as_str))
            .field("has_pkce", &self.pkce.is_some())
            .finish_non_exhaustive()
    }
}
