//! Domain types

pub mod http;
pub mod provider;
pub mod token;

pub use http::{
    cookie_header, AuthorizationOutcome, AuthorizationResponse, BrowserLoadRequest, Cookie,
};
pub use provider::{ProviderConfig, ProviderSettings};
pub use token::TokenPair;
