//! Error types for gpyro-scraper
//!
//! Per-item lookup failures are not errors here: the resolver turns them into
//! soft failures or escalates them to [`ScraperError::Lookup`] depending on the
//! configured policy.

use crate::models::PlaceId;
use thiserror::Error;

/// Scraper error type
#[derive(Debug, Error)]
pub enum ScraperError {
    /// Invalid configuration, raised before any network call
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote resource unreachable or missing its expected payload
    #[error("Unable to reach URL: {0}")]
    UnableToReachUrl(String),

    /// A lookup failure that was not tolerated
    #[error("Unable to get universeId for place {place_id}: {reason}")]
    Lookup { place_id: PlaceId, reason: String },

    /// Pipeline cancelled by the caller
    #[error("Operation cancelled")]
    Cancelled,

    /// Internal error (task panic, HTTP client construction)
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// gpyro-common error
    #[error("Common error: {0}")]
    Common(#[from] gpyro_common::Error),
}

/// Result type for scraper operations
pub type ScraperResult<T> = Result<T, ScraperError>;

/// Transport-level errors at the HTTP client seam
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Request exceeded its timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-2xx response
    #[error("HTTP status {0}")]
    Status(u16),

    /// Connection or other transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::Status(status.as_u16())
        } else if e.is_decode() {
            ClientError::Parse(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}
