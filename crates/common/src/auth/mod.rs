//! PKCE primitives for the authorization-code flow
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ AuthorizationService │  (psso-core) request state machine
//! └──────────┬───────────┘
//!            │
//!            └──► PkcePair   fresh verifier + S256 challenge per request
//! ```
//!
//! Pairs are never reused across authorization attempts; the verifier is
//! held until exactly one code exchange consumes it.

pub mod pkce;

pub use pkce::{
    generate_code_challenge, generate_code_verifier, PkcePair, CODE_CHALLENGE_METHOD,
    CODE_VERIFIER_LENGTH,
};
