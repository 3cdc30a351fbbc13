//! Configuration Validation Tests

use cbl_domain::error::Error;
use cbl_infrastructure::config::{AppConfig, ConfigLoader, Environment, validate_app_config};
use tempfile::TempDir;

#[test]
fn test_default_config_is_valid() {
    for environment in Environment::ALL {
        assert!(validate_app_config(&AppConfig::for_environment(environment)).is_ok());
    }
}

#[test]
fn test_zero_retry_attempts_rejected() {
    let mut config = AppConfig::default();
    config.loader.retry_attempts = 0;

    let err = validate_app_config(&config).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("Retry attempts"));
}

#[test]
fn test_zero_timeout_rejected() {
    let mut config = AppConfig::default();
    config.loader.timeout_ms = 0;

    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_zero_ttl_allowed() {
    let mut config = AppConfig::default();
    config.loader.cache_ttl_ms = 0;

    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_endpoint_must_be_http() {
    let mut config = AppConfig::default();

    config.source.endpoint = "ftp://builder.example.com/components".to_string();
    assert!(validate_app_config(&config).is_err());

    config.source.endpoint = "not a url".to_string();
    assert!(validate_app_config(&config).is_err());

    config.source.endpoint = "https://builder.example.com/components".to_string();
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_invalid_log_level_rejected() {
    let mut config = AppConfig::default();
    config.logging.level = "chatty".to_string();

    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_load_validates_file_values() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cbl.toml");
    std::fs::write(&config_path, "[loader]\nretry_attempts = 0\n").unwrap();

    let result = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_prefix("CBLTEST_VALIDATE")
        .with_environment(Environment::Test)
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}
