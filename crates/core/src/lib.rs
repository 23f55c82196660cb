//! # PSSO Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for token storage, token exchange and
//!   the host collaborator
//! - The provider configuration resolver
//! - The authorization request processor and redirect interceptor
//!
//! ## Architecture Principles
//! - Only depends on `psso-common` and `psso-domain`
//! - No keychain, HTTP, or platform code
//! - All external dependencies via traits

pub mod auth;

// Re-export specific items to avoid ambiguity
pub use auth::ports::{
    AuthorizationHost, Clock, CookieStore, SystemClock, TokenExchange, TokenStore,
};
pub use auth::{
    AuthorizationDisposition, AuthorizationRequest, AuthorizationService, LoginConfiguration,
    NavigationDisposition, NavigationEvent, PendingAuthorization, PlatformSsoHandler,
};
