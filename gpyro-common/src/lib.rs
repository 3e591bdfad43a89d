//! # gpyro Common Library
//!
//! Shared code for the gpyro scraper crates:
//! - Error and result types
//! - Bootstrap configuration loading (TOML)

pub mod config;
pub mod error;

pub use error::{Error, Result};
