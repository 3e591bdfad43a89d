//! Configuration resolution for gpyro-scraper
//!
//! Provides multi-tier configuration resolution with CLI → ENV → TOML → default priority.

use crate::error::{ScraperError, ScraperResult};
use gpyro_common::config::{EndpointConfig, TomlConfig};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub const ENV_MAX_CONCURRENT_REQUESTS: &str = "GPYRO_MAX_CONCURRENT_REQUESTS";
pub const ENV_REQUESTS_PER_SECOND: &str = "GPYRO_REQUESTS_PER_SECOND";
pub const ENV_IGNORE_FAILURES: &str = "GPYRO_IGNORE_FAILURES";
pub const ENV_AMOUNT: &str = "GPYRO_AMOUNT";

const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 1;
const DEFAULT_MAX_JITTER_MS: u64 = 100;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub max_concurrent_requests: Option<usize>,
    pub requests_per_second: Option<f64>,
    pub ignore_failures: Option<bool>,
    pub amount: Option<usize>,
}

/// Resolved pipeline configuration
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Gate size, 1 means fully serial
    pub max_concurrent_requests: usize,
    pub requests_per_second: f64,
    pub max_jitter: Duration,
    pub request_timeout: Duration,
    /// Tolerate status and missing-field lookup failures
    pub ignore_failures: bool,
    /// How many input place ids to process, all when `None`
    pub amount: Option<usize>,
    pub endpoints: EndpointConfig,
}

impl ScraperConfig {
    /// Configuration with built-in defaults and the given request rate
    pub fn new(requests_per_second: f64) -> Self {
        Self {
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            requests_per_second,
            max_jitter: Duration::from_millis(DEFAULT_MAX_JITTER_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            ignore_failures: false,
            amount: None,
            endpoints: EndpointConfig::default(),
        }
    }

    /// Resolve every setting by priority and validate the result
    pub fn resolve(cli: &CliOverrides, toml_config: &TomlConfig) -> ScraperResult<Self> {
        let max_concurrent_requests = cli
            .max_concurrent_requests
            .or(env_value(ENV_MAX_CONCURRENT_REQUESTS)?)
            .or(toml_config.max_concurrent_requests)
            .unwrap_or(DEFAULT_MAX_CONCURRENT_REQUESTS);

        let requests_per_second = cli
            .requests_per_second
            .or(env_value(ENV_REQUESTS_PER_SECOND)?)
            .or(toml_config.requests_per_second)
            .ok_or_else(|| {
                ScraperError::Config(format!(
                    "requests_per_second is required. Configure using one of:\n\
                     1. Command line: --requests-per-second 5\n\
                     2. Environment: {}=5\n\
                     3. TOML config: requests_per_second = 5.0",
                    ENV_REQUESTS_PER_SECOND
                ))
            })?;

        let ignore_failures = cli
            .ignore_failures
            .or(env_value(ENV_IGNORE_FAILURES)?)
            .or(toml_config.ignore_failures)
            .unwrap_or(false);

        let amount = cli
            .amount
            .or(env_value(ENV_AMOUNT)?)
            .or(toml_config.amount);

        let config = Self {
            max_concurrent_requests,
            requests_per_second,
            max_jitter: Duration::from_millis(
                toml_config.max_jitter_ms.unwrap_or(DEFAULT_MAX_JITTER_MS),
            ),
            request_timeout: Duration::from_secs(
                toml_config
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            ignore_failures,
            amount,
            endpoints: toml_config.endpoints.clone(),
        };

        config.validate()?;
        debug!(?config, "Resolved scraper configuration");
        Ok(config)
    }

    /// Reject non-positive concurrency, rate, timeout and amount
    pub fn validate(&self) -> ScraperResult<()> {
        if self.max_concurrent_requests == 0 {
            return Err(ScraperError::Config(
                "max_concurrent_requests must be a positive integer".to_string(),
            ));
        }

        if !self.requests_per_second.is_finite() || self.requests_per_second <= 0.0 {
            return Err(ScraperError::Config(format!(
                "requests_per_second must be a positive number, got {}",
                self.requests_per_second
            )));
        }

        if Duration::try_from_secs_f64(1.0 / self.requests_per_second).is_err() {
            return Err(ScraperError::Config(format!(
                "requests_per_second {} is too small, the delay between requests overflows",
                self.requests_per_second
            )));
        }

        if self.amount == Some(0) {
            return Err(ScraperError::Config(
                "Parameter 'amount' must be a positive whole number".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ScraperError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Minimum spacing between requests of one worker slot
    ///
    /// Saturates for rates that [`validate`](Self::validate) rejects.
    pub fn base_delay(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.requests_per_second).unwrap_or(Duration::MAX)
    }
}

/// Load the TOML config, `explicit` must exist when given
pub fn load_toml(explicit: Option<&Path>) -> ScraperResult<TomlConfig> {
    Ok(gpyro_common::config::load_or_default(explicit)?)
}

/// Check `amount` against the number of available place ids
///
/// Returns how many ids to process.
pub fn validate_amount(amount: Option<usize>, available: usize) -> ScraperResult<usize> {
    match amount {
        None => Ok(available),
        Some(n) if n > 0 && n <= available => Ok(n),
        Some(n) => Err(ScraperError::Config(format!(
            "Parameter 'amount' must be a positive whole number no greater than {}, got {}",
            available, n
        ))),
    }
}

fn env_value<T: FromStr>(name: &str) -> ScraperResult<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ScraperError::Config(format!("Invalid value for {}: {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}
