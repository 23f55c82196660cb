//! OIDC token-endpoint client

pub mod client;

pub use client::OidcTokenClient;
