//! Bootstrap configuration loading
//!
//! The TOML file only carries values; resolution against CLI arguments and
//! environment variables happens in the scraper crate. Priority order there is:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Built-in default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Roblox place → universe lookup endpoint, `{place_id}` is substituted per request
pub const DEFAULT_LOOKUP_URL: &str =
    "https://apis.roblox.com/universes/v1/places/{place_id}/universe";
/// Roblox bulk game metadata endpoint
pub const DEFAULT_GAMES_URL: &str = "https://games.roblox.com/v1/games";
/// Roblox bulk vote endpoint
pub const DEFAULT_VOTES_URL: &str = "https://games.roblox.com/v1/games/votes";
/// Rolimons game list endpoint
pub const DEFAULT_ROLIMONS_URL: &str = "https://api.rolimons.com/games/v1/gamelist";

/// Configuration loaded from TOML file
///
/// Every scalar is optional so that an absent key falls through to the
/// environment or built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Upper bound on simultaneous lookup requests
    #[serde(default)]
    pub max_concurrent_requests: Option<usize>,

    /// Lookup requests per second, per worker slot
    #[serde(default)]
    pub requests_per_second: Option<f64>,

    /// Upper bound of the random delay added to every lookup
    #[serde(default)]
    pub max_jitter_ms: Option<u64>,

    /// Per-request HTTP timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Continue past failed lookups instead of aborting
    #[serde(default)]
    pub ignore_failures: Option<bool>,

    /// How many place ids to process (all when absent)
    #[serde(default)]
    pub amount: Option<usize>,

    /// Upstream endpoints
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream endpoint URLs
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EndpointConfig {
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,

    #[serde(default = "default_games_url")]
    pub games_url: String,

    #[serde(default = "default_votes_url")]
    pub votes_url: String,

    #[serde(default = "default_rolimons_url")]
    pub rolimons_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            lookup_url: default_lookup_url(),
            games_url: default_games_url(),
            votes_url: default_votes_url(),
            rolimons_url: default_rolimons_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_lookup_url() -> String {
    DEFAULT_LOOKUP_URL.to_string()
}

fn default_games_url() -> String {
    DEFAULT_GAMES_URL.to_string()
}

fn default_votes_url() -> String {
    DEFAULT_VOTES_URL.to_string()
}

fn default_rolimons_url() -> String {
    DEFAULT_ROLIMONS_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Platform config file location: `<config_dir>/gpyro/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gpyro").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

/// Load the TOML config
///
/// An explicitly requested file must exist. The platform default file is
/// optional; when it is missing the built-in defaults are used.
pub fn load_or_default(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        info!("Loading config from {}", path.display());
        return load_toml_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            info!("Loading config from {}", path.display());
            load_toml_config(&path)
        }
        _ => {
            debug!("No config file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}
