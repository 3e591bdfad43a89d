//! Common error types for gpyro

use thiserror::Error;

/// Common result type for gpyro operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across gpyro crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file missing, unreadable or malformed
    #[error("Configuration error: {0}")]
    Config(String),
}
