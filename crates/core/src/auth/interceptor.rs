//! Navigation classification for the redirect interceptor
//!
//! Pure functions; the stateful half lives in
//! [`AuthorizationService::handle_navigation`](super::AuthorizationService::handle_navigation).

use url::Url;

/// Authorization code carried by an OIDC callback navigation.
///
/// Matches when the navigated URL starts with `redirect_uri` and has a
/// non-empty `code` query parameter.
#[must_use]
pub fn callback_code(navigated: &Url, redirect_uri: &str) -> Option<String> {
    if redirect_uri.is_empty() || !navigated.as_str().starts_with(redirect_uri) {
        return None;
    }

    navigated
        .query_pairs()
        .find(|(name, _)| name == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|code| !code.is_empty())
}

/// `true` when the navigation left the host of the original request.
///
/// A request without a host never counts as crossed.
#[must_use]
pub fn is_cross_host(navigated: &Url, request_host: Option<&str>) -> bool {
    match request_host {
        Some(host) => navigated.host_str() != Some(host),
        None => false,
    }
}
