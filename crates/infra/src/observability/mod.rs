//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured filter directive.

use psso_domain::{LoggingConfig, PssoError, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Returns `Ok(false)` when a subscriber is already installed; the existing
/// one is left in place.
///
/// # Errors
/// Returns `PssoError::Config` if the configured filter directive does not
/// parse.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.filter)?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true).with_target(true))
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_target(true)).try_init()
    };

    match installed {
        Ok(()) => {
            tracing::debug!(filter = %config.filter, json = config.json, "Tracing initialised");
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}

fn build_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| PssoError::Config(format!("Invalid log filter '{directive}': {e}")))
}
