//! Error types used throughout the PSSO crates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PSSO
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PssoError {
    /// Required endpoints or client id missing even after defaulting.
    #[error("Configuration invalid: {0}")]
    ConfigurationInvalid(String),

    /// Network-level failure talking to the token endpoint.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// Well-formed response lacking a required field.
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// The UI collaborator could not show the browser surface.
    #[error("Presentation failure: {0}")]
    PresentationFailure(String),

    /// Explicit user or host cancel.
    #[error("Authorization declined")]
    Declined,

    /// Secure credential store failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Application configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PssoError {
    /// Short, stable name of the error kind for structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigurationInvalid(_) => "configuration_invalid",
            Self::TransportFailure(_) => "transport_failure",
            Self::ProtocolError(_) => "protocol_error",
            Self::PresentationFailure(_) => "presentation_failure",
            Self::Declined => "declined",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
        }
    }
}

/// Result type alias for PSSO operations
pub type Result<T> = std::result::Result<T, PssoError>;
