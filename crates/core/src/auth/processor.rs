//! Authorization request processor and redirect interceptor
//!
//! One [`AuthorizationService`] serves every request for the lifetime of the
//! extension. At most one request is pending; the slot holding it is the
//! only place completion is decided, and whoever takes the handle out of the
//! slot is the one that completes it.

use std::sync::Arc;

use psso_common::auth::{PkcePair, CODE_CHALLENGE_METHOD};
use psso_domain::{
    cookie_header, AuthorizationOutcome, AuthorizationResponse, BrowserLoadRequest, Cookie,
    ProviderConfig, PssoError, TokenPair,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use url::Url;
use uuid::Uuid;

use super::config_resolver;
use super::interceptor;
use super::pending::{AuthorizationRequest, PendingAuthorization};
use super::ports::{AuthorizationHost, Clock, CookieStore, SystemClock, TokenExchange, TokenStore};

/// Path taken by [`AuthorizationService::begin_authorization`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDisposition {
    /// Completed from a still-valid cached token
    Cached,
    /// Completed after a silent refresh
    Refreshed,
    /// Browser surface presented for this URL; completion happens later
    Interactive(Option<Url>),
    /// Completed with an error
    Failed(PssoError),
    /// Cancelled or replaced before this path could complete it
    Superseded,
}

/// One browser navigation as observed by the UI collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub url: Url,
    /// Every cookie visible to the browser for the current page
    pub cookies: Vec<Cookie>,
}

impl NavigationEvent {
    #[must_use]
    pub fn new(url: Url, cookies: Vec<Cookie>) -> Self {
        Self { url, cookies }
    }
}

/// Whether the interceptor took over a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDisposition {
    /// Not ours; the browser keeps navigating
    Continue,
    /// The pending request was (or is being) completed from this navigation
    Intercepted,
}

/// Authorization request state machine
pub struct AuthorizationService {
    token_store: Arc<dyn TokenStore>,
    cookie_store: Arc<dyn CookieStore>,
    exchange: Arc<dyn TokenExchange>,
    clock: Arc<dyn Clock>,
    pending: Mutex<Option<PendingAuthorization>>,
}

impl AuthorizationService {
    pub fn new(
        token_store: Arc<dyn TokenStore>,
        cookie_store: Arc<dyn CookieStore>,
        exchange: Arc<dyn TokenExchange>,
    ) -> Self {
        Self {
            token_store,
            cookie_store,
            exchange,
            clock: Arc::new(SystemClock),
            pending: Mutex::new(None),
        }
    }

    /// Replace the wall clock used for cache validity checks
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Entry point for every host credential request.
    ///
    /// Tries the cached token, then a silent refresh, then interactive login.
    /// A request still pending from an earlier call is declined first.
    pub async fn begin_authorization(
        &self,
        request: AuthorizationRequest,
        host: Arc<dyn AuthorizationHost>,
    ) -> AuthorizationDisposition {
        let stale = self.pending.lock().await.take();
        if let Some(stale) = stale {
            warn!(request_id = %stale.id(), "New authorization request replaces a pending one");
            stale.decline();
        }

        let config = match config_resolver::resolve(&request.settings()) {
            Ok(config) => config,
            Err(err) => {
                error!(error = %err, "Provider configuration could not be resolved");
                host.complete(AuthorizationOutcome::Failed(err.clone()));
                return AuthorizationDisposition::Failed(err);
            }
        };

        let pending = PendingAuthorization::new(request, Arc::clone(&host), config.clone());
        let id = pending.id();
        debug!(
            request_id = %id,
            url = ?pending.request().url.as_ref().map(Url::as_str),
            "Authorization request received"
        );
        let replaced = self.pending.lock().await.replace(pending);
        if let Some(stale) = replaced {
            warn!(request_id = %stale.id(), "Concurrent authorization request declined");
            stale.decline();
        }

        if let Some(disposition) = self.try_cached_or_refresh(id, &config).await {
            return disposition;
        }

        self.start_interactive(id, host).await
    }

    /// CheckCache and TryRefresh. `None` means fall through to interactive.
    async fn try_cached_or_refresh(
        &self,
        id: Uuid,
        config: &ProviderConfig,
    ) -> Option<AuthorizationDisposition> {
        let cached = self.token_store.load()?;
        let now = self.clock.now();

        if cached.is_valid_at(now) {
            debug!(request_id = %id, expires_at = ?cached.expires_at, "Using cached access token");
            let Some(pending) = self.take_pending(id).await else {
                return Some(AuthorizationDisposition::Superseded);
            };
            pending.complete_with_bearer(&cached.access_token);
            return Some(AuthorizationDisposition::Cached);
        }

        if !cached.is_expired_at(now) {
            debug!(request_id = %id, "Cached token has no expiry, starting interactive login");
            return None;
        }

        let refresh_token = cached.usable_refresh_token()?;
        debug!(request_id = %id, "Cached access token expired, attempting refresh");

        match self.exchange.refresh(config, refresh_token).await {
            Ok(pair) => {
                self.persist_tokens(&pair);
                let Some(pending) = self.take_pending(id).await else {
                    info!(request_id = %id, "Request ended before refresh finished");
                    return Some(AuthorizationDisposition::Superseded);
                };
                info!(request_id = %id, "Access token refreshed");
                pending.complete_with_bearer(&pair.access_token);
                Some(AuthorizationDisposition::Refreshed)
            }
            Err(err) => {
                warn!(
                    request_id = %id,
                    error = %err,
                    kind = err.kind(),
                    "Token refresh failed, falling back to interactive login"
                );
                None
            }
        }
    }

    /// InteractiveSetup: pick the browser URL, attach PKCE, present.
    async fn start_interactive(
        &self,
        id: Uuid,
        host: Arc<dyn AuthorizationHost>,
    ) -> AuthorizationDisposition {
        let target_url = {
            let mut slot = self.pending.lock().await;
            let Some(pending) = slot.as_mut().filter(|pending| pending.id() == id) else {
                debug!(request_id = %id, "Request ended before interactive setup");
                return AuthorizationDisposition::Superseded;
            };

            let request_url = pending.request().url.clone();
            let (target_url, pkce) = match request_url {
                Some(url) if targets_issuer(&url, pending.config()) => {
                    let pkce = PkcePair::generate();
                    let authorize = authorize_url(pending.config(), pending.redirect_uri(), &pkce);
                    debug!(request_id = %id, "Starting OIDC authorization with PKCE");
                    (Some(authorize), Some(pkce))
                }
                other => {
                    debug!(request_id = %id, "Non-issuer host, loading requested URL as-is");
                    (other, None)
                }
            };

            pending.attach_interactive(target_url.clone(), pkce);
            target_url
        };

        if let Err(err) = host.present_authorization_view(target_url.as_ref()).await {
            error!(request_id = %id, error = %err, "Could not present authorization view");
            let failure = match err {
                PssoError::PresentationFailure(_) => err,
                other => PssoError::PresentationFailure(other.to_string()),
            };
            if let Some(pending) = self.take_pending(id).await {
                pending.fail(failure.clone());
            }
            return AuthorizationDisposition::Failed(failure);
        }

        AuthorizationDisposition::Interactive(target_url)
    }

    /// Redirect interceptor. Call for every server redirect the browser
    /// follows while a request is pending.
    pub async fn handle_navigation(&self, event: NavigationEvent) -> NavigationDisposition {
        let mut slot = self.pending.lock().await;
        let Some(pending) = slot.as_mut() else {
            return NavigationDisposition::Continue;
        };

        if let Some(code) = interceptor::callback_code(&event.url, pending.redirect_uri()) {
            let verifier = pending
                .take_pkce()
                .map(|pkce| pkce.code_verifier)
                .filter(|verifier| !verifier.is_empty());

            if let Some(verifier) = verifier {
                let id = pending.id();
                let config = pending.config().clone();
                let redirect_uri = pending.redirect_uri().to_string();
                drop(slot);

                self.redeem_code(id, &config, &code, &verifier, &redirect_uri).await;
                return NavigationDisposition::Intercepted;
            }

            debug!(request_id = %pending.id(), "Callback without PKCE verifier, not redeeming code");
        }

        if interceptor::is_cross_host(&event.url, pending.request().host()) {
            let Some(pending) = slot.take() else {
                return NavigationDisposition::Continue;
            };
            drop(slot);

            self.forward_cookies(pending, &event);
            return NavigationDisposition::Intercepted;
        }

        NavigationDisposition::Continue
    }

    /// Branch A: redeem the code and complete with a bearer response.
    async fn redeem_code(
        &self,
        id: Uuid,
        config: &ProviderConfig,
        code: &str,
        verifier: &str,
        redirect_uri: &str,
    ) {
        debug!(request_id = %id, "Exchanging authorization code");
        let result = self.exchange.exchange_code(config, code, verifier, redirect_uri).await;

        if let Ok(pair) = &result {
            self.persist_tokens(pair);
        }

        let Some(pending) = self.take_pending(id).await else {
            info!(request_id = %id, "Request ended before code exchange finished");
            return;
        };

        match result {
            Ok(pair) => {
                info!(request_id = %id, "Authorization code redeemed");
                pending.complete_with_bearer(&pair.access_token);
            }
            Err(err) => {
                warn!(request_id = %id, error = %err, kind = err.kind(), "Code exchange failed");
                pending.fail(err);
            }
        }
    }

    /// Branch B: persist the browser cookies and complete with a redirect.
    fn forward_cookies(&self, pending: PendingAuthorization, event: &NavigationEvent) {
        debug!(
            request_id = %pending.id(),
            cookie_count = event.cookies.len(),
            host = ?event.url.host_str(),
            "Forwarding session cookies"
        );

        if let Err(err) = self.cookie_store.save_cookies(&event.cookies) {
            error!(request_id = %pending.id(), error = %err, "Failed to persist session cookies");
        }

        match pending.response_url() {
            Ok(url) => {
                let response = AuthorizationResponse::redirect(
                    url,
                    event.url.as_str(),
                    cookie_header(&event.cookies),
                );
                pending.complete(AuthorizationOutcome::Completed(response));
            }
            Err(err) => pending.fail(err),
        }
    }

    /// UI cancel: decline the pending request, if any.
    pub async fn cancel(&self) {
        let pending = self.pending.lock().await.take();
        match pending {
            Some(pending) => {
                info!(request_id = %pending.id(), "Authorization cancelled");
                pending.decline();
            }
            None => debug!("Cancel with no pending request"),
        }
    }

    /// Initial page load for the browser surface: the interactive target
    /// plus persisted cookies as a `Cookie` header.
    pub async fn browser_load_request(&self) -> Option<BrowserLoadRequest> {
        let url = self.pending.lock().await.as_ref().and_then(|p| p.target_url().cloned())?;

        let cookies = self.cookie_store.load_cookies();
        let cookie_header = (!cookies.is_empty()).then(|| cookie_header(&cookies));

        Some(BrowserLoadRequest { url, cookie_header })
    }

    pub async fn has_pending(&self) -> bool {
        self.pending.lock().await.is_some()
    }

    /// Take the pending request only if it is still the one identified by
    /// `id`.
    async fn take_pending(&self, id: Uuid) -> Option<PendingAuthorization> {
        let mut slot = self.pending.lock().await;
        if slot.as_ref().is_some_and(|pending| pending.id() == id) {
            slot.take()
        } else {
            None
        }
    }

    fn persist_tokens(&self, pair: &TokenPair) {
        if let Err(err) = self.token_store.save(pair) {
            error!(error = %err, "Failed to persist token pair, continuing with in-memory token");
        }
    }
}

/// `true` when `url` points at the configured issuer host.
fn targets_issuer(url: &Url, config: &ProviderConfig) -> bool {
    match (url.host_str(), config.issuer_host()) {
        (Some(requested), Some(issuer)) => requested == issuer,
        _ => false,
    }
}

/// Authorize URL: the configured endpoint with the code-flow parameters
/// appended after any query it already carries.
#[must_use]
pub fn authorize_url(config: &ProviderConfig, redirect_uri: &str, pkce: &PkcePair) -> Url {
    let mut url = config.authorize_endpoint.clone();
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", &config.scopes)
        .append_pair("code_challenge_method", CODE_CHALLENGE_METHOD)
        .append_pair("code_challenge", &pkce.code_challenge);
    url
}
