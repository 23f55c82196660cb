//! Secure credential storage
//!
//! [`KeychainProvider`] talks to the platform keychain; [`SecretStore`] is
//! the seam adapters depend on so tests can swap in an in-memory double.

pub mod keychain;
pub mod traits;

pub use keychain::{KeychainError, KeychainProvider};
pub use traits::SecretStore;
