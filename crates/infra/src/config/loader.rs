//! Configuration loader
//!
//! Loads application configuration from files and environment variables.
//!
//! ## Loading Strategy
//! 1. Read a `.env` file into the process environment, if present
//! 2. Probe the standard locations for a config file
//! 3. Fall back to built-in defaults when none exists
//! 4. Apply environment overrides on top
//!
//! JSON and TOML files are supported.
//!
//! ## Environment Variables
//! - `PSSO_TOKEN_TIMEOUT_SECS`: Token endpoint timeout in seconds
//! - `PSSO_TOKEN_USER_AGENT`: User agent sent to the token endpoint
//! - `PSSO_KEYCHAIN_SERVICE`: Keychain service name
//! - `PSSO_KEYCHAIN_ACCOUNT`: Keychain account holding the token pair
//! - `PSSO_COOKIE_ACCOUNT`: Keychain account holding session cookies
//! - `PSSO_LOG`: Default `EnvFilter` directive
//! - `PSSO_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./psso.json` or `./psso.toml` (current working directory)
//! 2. `./config/psso.json` or `./config/psso.toml`
//! 3. Relative to executable location

use std::path::{Path, PathBuf};

use psso_domain::{PssoConfig, PssoError, Result};

/// Load configuration with automatic fallback strategy
///
/// Reads `.env`, then the first probed config file (or defaults when none
/// exists), and applies environment overrides on top.
///
/// # Errors
/// Returns `PssoError::Config` if a probed file cannot be parsed or an
/// override has an invalid value.
pub fn load() -> Result<PssoConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Could not load .env file"),
    }

    let base = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            PssoConfig::default()
        }
    };

    let config = apply_overrides(base, |key| std::env::var(key).ok())?;
    tracing::info!(
        timeout_seconds = config.token_endpoint.timeout_seconds,
        service = %config.keychain.service,
        "Configuration loaded"
    );
    Ok(config)
}

/// Apply `PSSO_*` overrides to `config`.
///
/// `lookup` resolves a variable name to its value; unset variables leave
/// the corresponding field untouched.
///
/// # Errors
/// Returns `PssoError::Config` for a non-numeric timeout.
pub fn apply_overrides<F>(mut config: PssoConfig, lookup: F) -> Result<PssoConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup("PSSO_TOKEN_TIMEOUT_SECS") {
        config.token_endpoint.timeout_seconds = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| PssoError::Config(format!("Invalid token timeout: {e}")))?;
    }
    if let Some(agent) = lookup("PSSO_TOKEN_USER_AGENT") {
        config.token_endpoint.user_agent = Some(agent);
    }
    if let Some(service) = lookup("PSSO_KEYCHAIN_SERVICE") {
        config.keychain.service = service;
    }
    if let Some(account) = lookup("PSSO_KEYCHAIN_ACCOUNT") {
        config.keychain.token_account = account;
    }
    if let Some(account) = lookup("PSSO_COOKIE_ACCOUNT") {
        config.keychain.cookie_account = account;
    }
    if let Some(filter) = lookup("PSSO_LOG") {
        config.logging.filter = filter;
    }
    config.logging.json = parse_bool(lookup("PSSO_LOG_JSON").as_deref(), config.logging.json);

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PssoError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<PssoConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PssoError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PssoError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PssoError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<PssoConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PssoError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PssoError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PssoError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
        candidates.extend(candidates_in(&cwd.join("config")));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> [PathBuf; 2] {
    [dir.join("psso.json"), dir.join("psso.toml")]
}

/// Parse a boolean flag
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Returns `default` when unset.
fn parse_bool(value: Option<&str>, default: bool) -> bool {
    value
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
