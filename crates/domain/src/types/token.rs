//! Persisted OAuth token pair
//!
//! Exactly one pair is stored at a time. Every successful code or refresh
//! exchange overwrites it.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Largest `expires_in` honoured, in seconds (ten years).
const MAX_EXPIRES_IN_SECS: f64 = 315_360_000.0;

/// Access token with optional refresh token and absolute expiry
///
/// Serialized as `{accessToken, refreshToken?, expiresAt?}` with
/// `expiresAt` as an RFC 3339 timestamp.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenPair {
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self { access_token: access_token.into(), refresh_token, expires_at }
    }

    /// Build a pair from a token response, converting the relative
    /// `expires_in` (seconds) into an absolute expiry at `received_at`.
    ///
    /// Non-finite or negative lifetimes are clamped to zero; lifetimes
    /// beyond ten years are clamped to ten years.
    #[must_use]
    pub fn from_expires_in(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in: Option<f64>,
        received_at: DateTime<Utc>,
    ) -> Self {
        let expires_at = expires_in.and_then(|seconds| {
            let seconds = if seconds.is_finite() { seconds.clamp(0.0, MAX_EXPIRES_IN_SECS) } else { 0.0 };
            #[allow(clippy::cast_possible_truncation)]
            let millis = (seconds * 1000.0).round() as i64;
            received_at.checked_add_signed(Duration::milliseconds(millis))
        });

        Self::new(access_token, refresh_token, expires_at)
    }

    /// `true` only when an expiry is defined and lies strictly after `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now < expires_at)
    }

    /// `true` when an expiry is defined and `now` is at or after it.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now >= expires_at)
    }

    /// Refresh token, ignoring empty strings
    #[must_use]
    pub fn usable_refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|token| !token.is_empty())
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
