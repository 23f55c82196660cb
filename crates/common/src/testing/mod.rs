//! Testing utilities
//!
//! - **[`mocks`]**: In-memory doubles for platform services

pub mod mocks;

pub use mocks::MockKeychainProvider;
