//! End-to-end authorization flow through the wired context
//!
//! **Purpose**: Drive `AuthorizationService` with the real keychain stores
//! (over the in-memory keychain) and the real token client (against WireMock)
//!
//! **Coverage:**
//! - Interactive login: authorize URL → callback → code exchange → bearer
//! - Cached token reuse on the next request
//! - Silent refresh of an expired token
//! - Failed code exchange surfaced to the host

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use psso_common::testing::MockKeychainProvider;
use psso_core::{
    AuthorizationDisposition, AuthorizationHost, AuthorizationRequest, NavigationDisposition,
    NavigationEvent, TokenStore,
};
use psso_domain::{AuthorizationOutcome, PssoConfig, PssoError, Result, TokenPair};
use psso_infra::{AuthContext, KeychainTokenStore};
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/application/o/token/";

#[derive(Default)]
struct RecordingHost {
    presented: Mutex<Vec<Option<Url>>>,
    outcomes: Mutex<Vec<AuthorizationOutcome>>,
}

#[async_trait]
impl AuthorizationHost for RecordingHost {
    async fn present_authorization_view(&self, url: Option<&Url>) -> Result<()> {
        self.presented.lock().push(url.cloned());
        Ok(())
    }

    fn complete(&self, outcome: AuthorizationOutcome) {
        self.outcomes.lock().push(outcome);
    }
}

fn settings_bag(server: &MockServer) -> Value {
    let base = server.uri();
    json!({
        "AdditionalSettings": {
            "issuer": base,
            "authorize": format!("{base}/application/o/authorize/"),
            "token": format!("{base}{TOKEN_PATH}"),
            "client_id": "ch.argio.sso"
        }
    })
}

fn request(server: &MockServer) -> AuthorizationRequest {
    let url = Url::parse(&format!("{}/app", server.uri())).expect("valid url");
    AuthorizationRequest::new(Some(url), settings_bag(server))
}

fn bearer(outcome: &AuthorizationOutcome) -> Option<&str> {
    match outcome {
        AuthorizationOutcome::Completed(response) => response.header("Authorization"),
        _ => None,
    }
}

/// Validates the interactive login and the cached follow-up request.
///
/// Assertions:
/// - The presented URL is the authorize endpoint with PKCE parameters
/// - The callback is exchanged at the token endpoint with the verifier
/// - The host receives `Bearer AAA` exactly once
/// - The token is persisted and reused for the next request without network
#[tokio::test]
async fn test_interactive_login_then_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=xyz"))
        .and(body_string_contains("code_verifier="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "AAA",
            "refresh_token": "RRR",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let keychain = MockKeychainProvider::new("psso");
    let context = AuthContext::with_secret_store(PssoConfig::default(), keychain.clone())
        .expect("context builds");
    let service = context.service();

    let host = Arc::new(RecordingHost::default());
    let disposition = service.begin_authorization(request(&server), host.clone()).await;

    let AuthorizationDisposition::Interactive(Some(authorize)) = disposition else {
        panic!("expected interactive login, got {disposition:?}");
    };
    assert_eq!(authorize.path(), "/application/o/authorize/");
    let query: Vec<(String, String)> = authorize.query_pairs().into_owned().collect();
    assert!(query.contains(&("response_type".into(), "code".into())));
    assert!(query.contains(&("code_challenge_method".into(), "S256".into())));
    assert!(query.contains(&("redirect_uri".into(), "ch.argio.psso://oauth/callback".into())));
    assert!(query.iter().any(|(key, value)| key == "code_challenge" && value.len() == 43));
    assert!(host.outcomes.lock().is_empty());

    let callback = Url::parse("ch.argio.psso://oauth/callback?code=xyz&state=ignored")
        .expect("valid callback");
    let navigation = service.handle_navigation(NavigationEvent::new(callback, Vec::new())).await;

    assert_eq!(navigation, NavigationDisposition::Intercepted);
    {
        let outcomes = host.outcomes.lock();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(bearer(&outcomes[0]), Some("Bearer AAA"));
    }

    let stored = keychain.raw("default").expect("token persisted");
    assert!(stored.contains(r#""accessToken":"AAA""#));

    let second = Arc::new(RecordingHost::default());
    let disposition = service.begin_authorization(request(&server), second.clone()).await;
    assert_eq!(disposition, AuthorizationDisposition::Cached);
    assert_eq!(bearer(&second.outcomes.lock()[0]), Some("Bearer AAA"));
    assert!(second.presented.lock().is_empty());
}

/// Validates silent refresh against the token endpoint.
///
/// Assertions:
/// - Expired token is refreshed with its refresh token
/// - Host receives the new access token without a browser
/// - The refresh token is carried forward into the keychain
#[tokio::test]
async fn test_expired_token_is_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "B",
            "expires_in": 600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let keychain = MockKeychainProvider::new("psso");
    KeychainTokenStore::new(keychain.clone(), "default")
        .save(&TokenPair::new("A", Some("R1".into()), Some(Utc::now() - Duration::minutes(5))))
        .expect("seed token");

    let context = AuthContext::with_secret_store(PssoConfig::default(), keychain.clone())
        .expect("context builds");
    let host = Arc::new(RecordingHost::default());

    let disposition = context.service().begin_authorization(request(&server), host.clone()).await;

    assert_eq!(disposition, AuthorizationDisposition::Refreshed);
    assert_eq!(bearer(&host.outcomes.lock()[0]), Some("Bearer B"));
    assert!(host.presented.lock().is_empty());

    let stored = KeychainTokenStore::new(keychain, "default").load().expect("token persisted");
    assert_eq!(stored.access_token, "B");
    assert_eq!(stored.refresh_token.as_deref(), Some("R1"));
}

/// Validates that a rejected code exchange fails the request.
///
/// Assertions:
/// - Host receives `Failed(ProtocolError)` carrying the OAuth error
/// - Nothing is written to the keychain
#[tokio::test]
async fn test_rejected_code_fails_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let keychain = MockKeychainProvider::new("psso");
    let context = AuthContext::with_secret_store(PssoConfig::default(), keychain.clone())
        .expect("context builds");
    let service = context.service();
    let host = Arc::new(RecordingHost::default());

    service.begin_authorization(request(&server), host.clone()).await;
    let callback = Url::parse("ch.argio.psso://oauth/callback?code=stale").expect("valid url");
    service.handle_navigation(NavigationEvent::new(callback, Vec::new())).await;

    assert_eq!(
        *host.outcomes.lock(),
        vec![AuthorizationOutcome::Failed(PssoError::ProtocolError("invalid_grant".into()))]
    );
    assert_eq!(keychain.raw("default"), None);
    assert!(!service.has_pending().await);
}

/// Validates the context defaults wire the built-in platform-SSO handler.
#[test]
fn test_context_exposes_platform_sso_configuration() {
    let context =
        AuthContext::with_secret_store(PssoConfig::default(), MockKeychainProvider::new("psso"))
            .expect("context builds");

    let configuration = context.platform_sso.configuration();
    assert_eq!(configuration.issuer.as_str(), "https://auth.argio.ch/");
    assert_eq!(configuration.audience, "macos");
    assert_eq!(context.config, PssoConfig::default());
}
