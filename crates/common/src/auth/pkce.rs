//! PKCE (Proof Key for Code Exchange) implementation for OAuth 2.0
//!
//! Implements RFC 7636 with the `S256` challenge method.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of every generated code verifier
pub const CODE_VERIFIER_LENGTH: usize = 64;

/// The only supported challenge method
pub const CODE_CHALLENGE_METHOD: &str = "S256";

/// RFC 7636 unreserved characters
const VERIFIER_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// Generate a cryptographically secure code verifier
///
/// Returns [`CODE_VERIFIER_LENGTH`] characters drawn uniformly from the
/// unreserved set `[A-Za-z0-9-._~]` using the operating system RNG.
#[must_use]
pub fn generate_code_verifier() -> String {
    let mut rng = OsRng;
    (0..CODE_VERIFIER_LENGTH)
        .map(|_| char::from(VERIFIER_CHARSET[rng.gen_range(0..VERIFIER_CHARSET.len())]))
        .collect()
}

/// Generate code challenge from verifier using SHA256
///
/// The challenge is `BASE64URL(SHA256(ASCII(code_verifier)))` without
/// padding.
#[must_use]
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Verifier and derived challenge for one authorization request
///
/// The verifier stays secret until the token exchange; the challenge goes
/// out on the authorize URL.
#[derive(Clone, PartialEq, Eq)]
pub struct PkcePair {
    pub code_verifier: String,
    pub code_challenge: String,
}

impl PkcePair {
    /// Generate a fresh pair.
    ///
    /// # Examples
    /// ```
    /// use psso_common::auth::PkcePair;
    ///
    /// let pair = PkcePair::generate();
    /// assert_eq!(pair.code_verifier.len(), 64);
    /// assert_eq!(pair.code_challenge.len(), 43);
    /// ```
    #[must_use]
    pub fn generate() -> Self {
        Self::from_verifier(generate_code_verifier())
    }

    /// Derive the pair for a known verifier.
    #[must_use]
    pub fn from_verifier(code_verifier: impl Into<String>) -> Self {
        let code_verifier = code_verifier.into();
        let code_challenge = generate_code_challenge(&code_verifier);
        Self { code_verifier, code_challenge }
    }

    /// Get the challenge method (always "S256")
    #[must_use]
    pub fn challenge_method(&self) -> &'static str {
        CODE_CHALLENGE_METHOD
    }
}

impl std::fmt::Debug for PkcePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkcePair")
            .field("code_verifier", &"<redacted>")
            .field("code_challenge", &self.code_challenge)
            .finish()
    }
}
