//! Modular common utilities shared across PSSO crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: PKCE generation (pure, no I/O)
//! - `observability`: tracing instrumentation (not included by default)
//! - `platform`: platform keychain access
//! - `test-utils`: in-memory keychain double for tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod auth;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod security;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(feature = "test-utils")]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use auth::PkcePair;
#[cfg(feature = "platform")]
pub use security::{KeychainError, KeychainProvider, SecretStore};
