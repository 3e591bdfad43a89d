//! gpyro-scraper library interface
//!
//! Resolves Roblox place ids to universe ids under a concurrency gate and
//! rate limiter, fetches game and vote metadata in bulk, and joins the two.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::config::ScraperConfig;
pub use crate::error::{ClientError, ScraperError, ScraperResult};
