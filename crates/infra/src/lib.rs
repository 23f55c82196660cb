//! # PSSO Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Keychain-backed token and cookie stores
//! - The `reqwest` token-endpoint client
//! - Configuration loading and tracing initialisation
//! - [`AuthContext`], which wires adapters into the core service
//!
//! ## Architecture
//! - Implements traits defined in `psso-core`
//! - Contains all "impure" code (keychain, network, environment)

pub mod config;
pub mod context;
pub mod errors;
pub mod keychain;
pub mod observability;
pub mod oidc;

// Re-export commonly used items
pub use context::AuthContext;
pub use errors::InfraError;
pub use keychain::{KeychainCookieStore, KeychainTokenStore};
pub use oidc::OidcTokenClient;
