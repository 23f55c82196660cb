//! Integration tests for the PKCE generator
//!
//! Exercises the public `psso_common::auth` surface the way the
//! authorization service consumes it.

#![cfg(feature = "foundation")]

use std::collections::HashSet;

use psso_common::auth::{
    generate_code_challenge, generate_code_verifier, PkcePair, CODE_CHALLENGE_METHOD,
    CODE_VERIFIER_LENGTH,
};

/// Validates PKCE pair generation against RFC 7636 constraints.
///
/// # Test Steps
/// 1. Generate a batch of pairs
/// 2. Verify every verifier is 64 unreserved characters
/// 3. Verify every challenge is the unpadded base64url SHA-256 of its verifier
#[test]
fn test_generated_pairs_are_well_formed() {
    for _ in 0..32 {
        let pair = PkcePair::generate();

        assert_eq!(pair.code_verifier.len(), CODE_VERIFIER_LENGTH);
        assert!(pair
            .code_verifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')));

        assert_eq!(pair.code_challenge, generate_code_challenge(&pair.code_verifier));
        assert_eq!(pair.code_challenge.len(), 43);
        assert!(pair
            .code_challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}

/// Validates that verifiers do not repeat across many generations.
#[test]
fn test_verifiers_do_not_repeat() {
    let verifiers: HashSet<String> = (0..256).map(|_| generate_code_verifier()).collect();
    assert_eq!(verifiers.len(), 256);
}

/// Validates the RFC 7636 appendix B example through the pair constructor.
#[test]
fn test_known_verifier_produces_known_challenge() {
    let pair = PkcePair::from_verifier("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");

    assert_eq!(pair.code_challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
    assert_eq!(pair.challenge_method(), CODE_CHALLENGE_METHOD);
}
