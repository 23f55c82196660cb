//! Keychain-backed implementations of the core storage ports
//!
//! Both stores write JSON into a single account of the configured keychain
//! service and replace the previous value on every save.

pub mod cookie_store;
pub mod token_store;

pub use cookie_store::KeychainCookieStore;
pub use token_store::KeychainTokenStore;
