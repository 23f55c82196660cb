//! Shared test helpers for `psso-core` integration tests.
//!
//! Lightweight recording doubles for every port so scenarios can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use psso_core::{AuthorizationHost, AuthorizationService, Clock, CookieStore, TokenExchange, TokenStore};
use psso_domain::{AuthorizationOutcome, Cookie, ProviderConfig, PssoError, Result, TokenPair};
use tokio::sync::Notify;
use url::Url;

/// In-memory single-slot token store
#[derive(Default)]
pub struct MemoryTokenStore {
    pub slot: Mutex<Option<TokenPair>>,
    pub fail_saves: AtomicBool,
}

impl MemoryTokenStore {
    pub fn with(pair: TokenPair) -> Self {
        Self { slot: Mutex::new(Some(pair)), ..Self::default() }
    }

    pub fn stored(&self) -> Option<TokenPair> {
        self.slot.lock().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, pair: &TokenPair) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PssoError::Storage("keychain unavailable".into()));
        }
        *self.slot.lock() = Some(pair.clone());
        Ok(())
    }

    fn load(&self) -> Option<TokenPair> {
        self.slot.lock().clone()
    }
}

#[derive(Default)]
pub struct MemoryCookieStore {
    pub cookies: Mutex<Vec<Cookie>>,
}

impl CookieStore for MemoryCookieStore {
    fn save_cookies(&self, cookies: &[Cookie]) -> Result<()> {
        *self.cookies.lock() = cookies.to_vec();
        Ok(())
    }

    fn load_cookies(&self) -> Vec<Cookie> {
        self.cookies.lock().clone()
    }
}

/// Recorded call to the token endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeCall {
    Code { code: String, verifier: String, redirect_uri: String },
    Refresh { refresh_token: String },
}

/// Scripted token exchange
#[derive(Default)]
pub struct ScriptedExchange {
    pub calls: Mutex<Vec<ExchangeCall>>,
    pub code_response: Mutex<Option<Result<TokenPair>>>,
    pub refresh_response: Mutex<Option<Result<TokenPair>>>,
    /// When set, code exchanges wait for a notification before answering
    pub gate: Option<Arc<Notify>>,
}

impl ScriptedExchange {
    pub fn answering_code(response: Result<TokenPair>) -> Self {
        Self { code_response: Mutex::new(Some(response)), ..Self::default() }
    }

    pub fn answering_refresh(response: Result<TokenPair>) -> Self {
        Self { refresh_response: Mutex::new(Some(response)), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<ExchangeCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl TokenExchange for ScriptedExchange {
    async fn exchange_code(
        &self,
        _config: &ProviderConfig,
        code: &str,
        code_verifier: &str,
        redirect_uri: &str,
    ) -> Result<TokenPair> {
        self.calls.lock().push(ExchangeCall::Code {
            code: code.to_string(),
            verifier: code_verifier.to_string(),
            redirect_uri: redirect_uri.to_string(),
        });
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.code_response
            .lock()
            .take()
            .unwrap_or_else(|| Err(PssoError::TransportFailure("no scripted response".into())))
    }

    async fn refresh(&self, _config: &ProviderConfig, refresh_token: &str) -> Result<TokenPair> {
        self.calls
            .lock()
            .push(ExchangeCall::Refresh { refresh_token: refresh_token.to_string() });
        self.refresh_response
            .lock()
            .take()
            .unwrap_or_else(|| Err(PssoError::TransportFailure("no scripted response".into())))
    }
}

/// Host double recording presentations and outcomes
#[derive(Default)]
pub struct RecordingHost {
    pub presented: Mutex<Vec<Option<Url>>>,
    pub outcomes: Mutex<Vec<AuthorizationOutcome>>,
    pub presentation_error: Mutex<Option<PssoError>>,
}

impl RecordingHost {
    pub fn failing_presentation(error: PssoError) -> Self {
        Self { presentation_error: Mutex::new(Some(error)), ..Self::default() }
    }

    pub fn outcomes(&self) -> Vec<AuthorizationOutcome> {
        self.outcomes.lock().clone()
    }

    pub fn presented(&self) -> Vec<Option<Url>> {
        self.presented.lock().clone()
    }
}

#[async_trait]
impl AuthorizationHost for RecordingHost {
    async fn present_authorization_view(&self, url: Option<&Url>) -> Result<()> {
        self.presented.lock().push(url.cloned());
        match self.presentation_error.lock().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn complete(&self, outcome: AuthorizationOutcome) {
        self.outcomes.lock().push(outcome);
    }
}

/// Clock pinned to a fixed instant
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Service wired to the given doubles
pub struct Harness {
    pub service: Arc<AuthorizationService>,
    pub tokens: Arc<MemoryTokenStore>,
    pub cookies: Arc<MemoryCookieStore>,
    pub exchange: Arc<ScriptedExchange>,
}

impl Harness {
    pub fn new(tokens: MemoryTokenStore, exchange: ScriptedExchange, now: DateTime<Utc>) -> Self {
        let tokens = Arc::new(tokens);
        let cookies = Arc::new(MemoryCookieStore::default());
        let exchange = Arc::new(exchange);
        let service = AuthorizationService::new(tokens.clone(), cookies.clone(), exchange.clone())
            .with_clock(Arc::new(FixedClock(now)));

        Self { service: Arc::new(service), tokens, cookies, exchange }
    }
}

pub fn url(raw: &str) -> Url {
    Url::parse(raw).expect("valid url")
}
