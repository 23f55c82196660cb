//! Web-view level types: cookies, synthesized responses, request outcomes

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::PssoError;

/// Browser cookie captured from the web view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Cookie {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into(), domain: None, path: None }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// Render cookies as a single `Cookie` request header value.
///
/// Pairs are `name=value` joined by `"; "`. An empty slice yields an empty
/// string.
#[must_use]
pub fn cookie_header(cookies: &[Cookie]) -> String {
    cookies
        .iter()
        .map(|cookie| format!("{}={}", cookie.name, cookie.value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Synthesized HTTP response handed back to the host on completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResponse {
    pub url: Url,
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl AuthorizationResponse {
    /// 200 response carrying `Authorization: Bearer <token>`
    #[must_use]
    pub fn bearer(url: Url, access_token: &str) -> Self {
        Self {
            url,
            status: 200,
            headers: vec![("Authorization".to_string(), format!("Bearer {access_token}"))],
        }
    }

    /// 302 response pointing at `location` and replaying `set_cookie`
    #[must_use]
    pub fn redirect(url: Url, location: &str, set_cookie: String) -> Self {
        Self {
            url,
            status: 302,
            headers: vec![
                ("Location".to_string(), location.to_string()),
                ("Set-Cookie".to_string(), set_cookie),
            ],
        }
    }

    /// Case-insensitive header lookup
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Terminal result reported to the host for one authorization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    Completed(AuthorizationResponse),
    Failed(PssoError),
    /// The extension declines; the host falls back to its default handling.
    NotHandled,
}

impl AuthorizationOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Initial page load for the embedded browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserLoadRequest {
    pub url: Url,
    /// Stored cookies replayed as a `Cookie` header, if any
    pub cookie_header: Option<String>,
}
