//! Authorization request lifecycle
//!
//! ```text
//! ┌──────────────────────┐
//! │ AuthorizationService │  begin_authorization / handle_navigation / cancel
//! └──────────┬───────────┘
//!            │
//!            ├──► config_resolver   settings bag -> ProviderConfig
//!            ├──► TokenStore        cached pair (CheckCache)
//!            ├──► TokenExchange     refresh + code exchange
//!            ├──► CookieStore       forwarded session cookies
//!            └──► PendingAuthorization
//!                      │  owns host handle, PKCE pair, redirect URI
//!                      └──► AuthorizationHost::complete  (exactly once)
//! ```

pub mod config_resolver;
pub mod interceptor;
pub mod pending;
pub mod platform_sso;
pub mod ports;
pub mod processor;

pub use pending::{AuthorizationRequest, PendingAuthorization};
pub use platform_sso::{LoginConfiguration, PlatformSsoHandler};
pub use processor::{
    AuthorizationDisposition, AuthorizationService, NavigationDisposition, NavigationEvent,
};
