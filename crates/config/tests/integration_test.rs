//! Integration tests for configuration loading.
//!
//! These tests verify end-to-end config loading behavior, ensuring that
//! the ConfigLoader builder chain works correctly for the service entrypoint.

use std::time::Duration;

use provisioner_config::{ConfigError, ConfigLoader, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use secrecy::{ExposeSecret, SecretString};
use serial_test::serial;

/// Test that values set via builder methods take precedence over defaults.
#[test]
#[serial]
fn test_config_loader_explicit_overrides() {
    let config = ConfigLoader::new()
        .with_base_url("https://icepanel.internal.example.com/v1".to_string())
        .with_landscape_id("hWFggyCYwu5kun6fpsu7".to_string())
        .with_api_key(SecretString::new("override-key".into()))
        .with_timeout(Duration::from_secs(5))
        .build()
        .expect("should build with explicit overrides");

    assert_eq!(config.base_url, "https://icepanel.internal.example.com/v1");
    assert_eq!(config.landscape_id, "hWFggyCYwu5kun6fpsu7");
    assert_eq!(config.api_key.expose_secret(), "override-key");
    assert_eq!(config.timeout, Duration::from_secs(5));
}

/// Test the full environment chain the binary entrypoint uses:
/// `load_dotenv` (gated off), `from_env`, then `build`.
#[test]
#[serial]
fn test_entrypoint_chain_from_environment() {
    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("true")),
            ("ICEPANEL_BASE_URL", None),
            ("ICEPANEL_LANDSCAPE_ID", Some("land-42")),
            ("ICEPANEL_API_KEY", Some("env-key")),
            ("PROVISIONER_TIMEOUT_SECS", None),
            ("PROVISIONER_BIND_ADDR", Some("127.0.0.1:8099")),
        ],
        || {
            let config = ConfigLoader::new()
                .load_dotenv()
                .expect("dotenv gate should not fail")
                .from_env()
                .expect("env values should parse")
                .build()
                .expect("required variables are set");

            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.landscape_id, "land-42");
            assert_eq!(config.api_key.expose_secret(), "env-key");
            assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
            assert_eq!(config.bind_addr, "127.0.0.1:8099".parse().unwrap());
        },
    );
}

/// Test that a missing API key is reported by name, not swallowed.
#[test]
#[serial]
fn test_missing_api_key_is_reported_by_name() {
    temp_env::with_vars(
        [
            ("ICEPANEL_LANDSCAPE_ID", Some("land-42")),
            ("ICEPANEL_API_KEY", None::<&str>),
        ],
        || {
            let err = ConfigLoader::new()
                .from_env()
                .expect("reading env should succeed")
                .build()
                .expect_err("missing API key must fail the build");

            match err {
                ConfigError::MissingEnvVar(var) => assert_eq!(var, "ICEPANEL_API_KEY"),
                other => panic!("unexpected error: {other}"),
            }
        },
    );
}

/// Test that whitespace-only environment values are treated as unset.
#[test]
#[serial]
fn test_blank_env_values_are_treated_as_unset() {
    temp_env::with_vars(
        [
            ("ICEPANEL_BASE_URL", Some("   ")),
            ("ICEPANEL_LANDSCAPE_ID", Some("land-42")),
            ("ICEPANEL_API_KEY", Some("k")),
        ],
        || {
            let config = ConfigLoader::new()
                .from_env()
                .expect("reading env should succeed")
                .build()
                .expect("blank base URL falls back to the default");

            assert_eq!(config.base_url, DEFAULT_BASE_URL);
        },
    );
}
