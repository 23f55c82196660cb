//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! layering overrides on top.

use psso_domain::{PssoConfig, PssoError};
use psso_infra::config;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write config file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        "psso.json",
        r#"{
            "token_endpoint": { "timeout_seconds": 10, "user_agent": "psso-test/1.0" },
            "keychain": { "service": "ch.argio.psso", "token_account": "primary", "cookie_account": "jar" },
            "logging": { "filter": "psso=debug", "json": true }
        }"#,
    );

    let config = config::load_from_file(Some(path)).expect("Failed to load config from JSON file");

    assert_eq!(config.token_endpoint.timeout_seconds, 10);
    assert_eq!(config.token_endpoint.user_agent.as_deref(), Some("psso-test/1.0"));
    assert_eq!(config.keychain.service, "ch.argio.psso");
    assert_eq!(config.keychain.token_account, "primary");
    assert_eq!(config.keychain.cookie_account, "jar");
    assert_eq!(config.logging.filter, "psso=debug");
    assert!(config.logging.json);
}

#[test]
fn test_load_config_from_toml_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        "psso.toml",
        r#"
[token_endpoint]
timeout_seconds = 5

[keychain]
service = "toml-service"
"#,
    );

    let config = config::load_from_file(Some(path)).expect("Failed to load config from TOML file");

    assert_eq!(config.token_endpoint.timeout_seconds, 5);
    assert_eq!(config.keychain.service, "toml-service");
    // Unset sections keep their defaults
    assert_eq!(config.keychain.token_account, "default");
    assert_eq!(config.logging, PssoConfig::default().logging);
}

#[test]
fn test_empty_json_object_yields_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "psso.json", "{}");

    let config = config::load_from_file(Some(path)).expect("Empty object should parse");
    assert_eq!(config, PssoConfig::default());
}

#[test]
fn test_invalid_file_contents_are_config_errors() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let bad_json = write_config(&dir, "psso.json", r#"{ "keychain": "#);
    assert!(matches!(config::load_from_file(Some(bad_json)), Err(PssoError::Config(_))));

    let bad_toml = write_config(&dir, "psso.toml", "[token_endpoint\ntimeout_seconds = 5");
    assert!(matches!(config::load_from_file(Some(bad_toml)), Err(PssoError::Config(_))));

    let wrong_type =
        write_config(&dir, "typed.json", r#"{ "token_endpoint": { "timeout_seconds": "slow" } }"#);
    assert!(matches!(config::load_from_file(Some(wrong_type)), Err(PssoError::Config(_))));
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = config::load_from_file(Some(dir.path().join("absent.toml")));

    match result {
        Err(PssoError::Config(message)) => assert!(message.contains("not found")),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn test_overrides_layer_on_file_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        "psso.toml",
        "[keychain]\nservice = \"from-file\"\ntoken_account = \"file-account\"\n",
    );
    let base = config::load_from_file(Some(path)).expect("Failed to load config");

    let config = config::apply_overrides(base, |key| match key {
        "PSSO_KEYCHAIN_ACCOUNT" => Some("env-account".to_string()),
        "PSSO_LOG_JSON" => Some("on".to_string()),
        _ => None,
    })
    .expect("Overrides should apply");

    assert_eq!(config.keychain.service, "from-file");
    assert_eq!(config.keychain.token_account, "env-account");
    assert!(config.logging.json);
}
