//! Unit tests for configuration resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate GPYRO_* variables are marked with #[serial].

use gpyro_common::config::TomlConfig;
use gpyro_scraper::config::{
    CliOverrides, ScraperConfig, ENV_AMOUNT, ENV_IGNORE_FAILURES, ENV_MAX_CONCURRENT_REQUESTS,
    ENV_REQUESTS_PER_SECOND,
};
use gpyro_scraper::ScraperError;
use serial_test::serial;
use std::time::Duration;

fn clear_env() {
    for name in [
        ENV_MAX_CONCURRENT_REQUESTS,
        ENV_REQUESTS_PER_SECOND,
        ENV_IGNORE_FAILURES,
        ENV_AMOUNT,
    ] {
        std::env::remove_var(name);
    }
}

fn toml_with_rate(rate: f64) -> TomlConfig {
    TomlConfig {
        requests_per_second: Some(rate),
        ..TomlConfig::default()
    }
}

#[test]
#[serial]
fn test_defaults_applied() {
    clear_env();

    let config = ScraperConfig::resolve(&CliOverrides::default(), &toml_with_rate(5.0)).unwrap();

    assert_eq!(config.max_concurrent_requests, 1);
    assert_eq!(config.requests_per_second, 5.0);
    assert_eq!(config.max_jitter, Duration::from_millis(100));
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert!(!config.ignore_failures);
    assert!(config.amount.is_none());
}

#[test]
#[serial]
fn test_missing_rate_is_config_error() {
    clear_env();

    let result = ScraperConfig::resolve(&CliOverrides::default(), &TomlConfig::default());
    assert!(matches!(result, Err(ScraperError::Config(_))));
}

#[test]
#[serial]
fn test_cli_overrides_env_and_toml() {
    clear_env();
    std::env::set_var(ENV_MAX_CONCURRENT_REQUESTS, "8");

    let toml_config = TomlConfig {
        max_concurrent_requests: Some(2),
        ..toml_with_rate(1.0)
    };
    let cli = CliOverrides {
        max_concurrent_requests: Some(16),
        ..CliOverrides::default()
    };

    let config = ScraperConfig::resolve(&cli, &toml_config).unwrap();
    assert_eq!(config.max_concurrent_requests, 16);

    clear_env();
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    std::env::set_var(ENV_REQUESTS_PER_SECOND, "12.5");
    std::env::set_var(ENV_IGNORE_FAILURES, "true");
    std::env::set_var(ENV_AMOUNT, "40");

    let toml_config = TomlConfig {
        ignore_failures: Some(false),
        amount: Some(10),
        ..toml_with_rate(1.0)
    };

    let config = ScraperConfig::resolve(&CliOverrides::default(), &toml_config).unwrap();
    assert_eq!(config.requests_per_second, 12.5);
    assert!(config.ignore_failures);
    assert_eq!(config.amount, Some(40));

    clear_env();
}

#[test]
#[serial]
fn test_unparsable_env_is_config_error() {
    clear_env();
    std::env::set_var(ENV_MAX_CONCURRENT_REQUESTS, "lots");

    let result = ScraperConfig::resolve(&CliOverrides::default(), &toml_with_rate(1.0));
    assert!(matches!(result, Err(ScraperError::Config(_))));

    clear_env();
}

#[test]
#[serial]
fn test_non_positive_values_rejected() {
    clear_env();

    let zero_workers = CliOverrides {
        max_concurrent_requests: Some(0),
        ..CliOverrides::default()
    };
    assert!(matches!(
        ScraperConfig::resolve(&zero_workers, &toml_with_rate(1.0)),
        Err(ScraperError::Config(_))
    ));

    assert!(matches!(
        ScraperConfig::resolve(&CliOverrides::default(), &toml_with_rate(-3.0)),
        Err(ScraperError::Config(_))
    ));
}

#[test]
#[serial]
fn test_tiny_rate_is_config_error() {
    clear_env();

    let result = ScraperConfig::resolve(&CliOverrides::default(), &toml_with_rate(1e-20));

    assert!(matches!(result, Err(ScraperError::Config(_))));
}

#[test]
#[serial]
fn test_zero_amount_rejected_at_resolution() {
    clear_env();

    let cli = CliOverrides {
        amount: Some(0),
        ..CliOverrides::default()
    };

    assert!(matches!(
        ScraperConfig::resolve(&cli, &toml_with_rate(1.0)),
        Err(ScraperError::Config(_))
    ));
}
