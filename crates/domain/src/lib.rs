//! # PSSO Domain
//!
//! Domain types for the PSSO credential-provisioning client.
//!
//! This crate contains:
//! - Token, provider configuration and HTTP response models
//! - Domain error types and Result definitions
//! - Application configuration structures
//! - Built-in provider constants
//!
//! ## Architecture
//! - No dependencies on other PSSO crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
