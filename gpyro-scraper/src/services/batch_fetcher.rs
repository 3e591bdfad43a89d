//! Bulk game metadata and vote fetch
//!
//! Two sequential calls, neither gated nor rate limited.

use crate::error::{ScraperError, ScraperResult};
use crate::models::{GameRecord, UniverseId, VoteRecord};
use crate::services::roblox_client::RobloxApi;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

const DATA_FIELD: &str = "data";

/// Game and vote batches for one id set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batches {
    pub games: Vec<GameRecord>,
    pub votes: Vec<VoteRecord>,
}

pub struct BatchFetcher {
    api: Arc<dyn RobloxApi>,
}

impl BatchFetcher {
    pub fn new(api: Arc<dyn RobloxApi>) -> Self {
        Self { api }
    }

    /// Fetch both batches for a deduplicated id set
    ///
    /// An empty set returns two empty batches without any request.
    pub async fn fetch(&self, universe_ids: &[UniverseId]) -> ScraperResult<Batches> {
        if universe_ids.is_empty() {
            info!("No universe ids to fetch, skipping batch requests");
            return Ok(Batches::default());
        }

        info!(count = universe_ids.len(), "Fetching Roblox game data from universe ids");

        let games = self
            .api
            .fetch_games(universe_ids)
            .await
            .map_err(|e| ScraperError::UnableToReachUrl(format!("games endpoint: {}", e)))?;
        let votes = self
            .api
            .fetch_votes(universe_ids)
            .await
            .map_err(|e| ScraperError::UnableToReachUrl(format!("votes endpoint: {}", e)))?;

        let games = extract_data(games, "games")?;
        let votes = extract_data(votes, "votes")?;

        if games.len() != votes.len() {
            warn!(
                games = games.len(),
                votes = votes.len(),
                "Game and vote batch lengths differ"
            );
        }

        Ok(Batches { games, votes })
    }
}

/// Pull the `data` array out of a bulk response
///
/// Non-object entries inside `data` are dropped.
fn extract_data(body: Value, endpoint: &str) -> ScraperResult<Vec<serde_json::Map<String, Value>>> {
    let Value::Object(mut body) = body else {
        return Err(ScraperError::UnableToReachUrl(format!(
            "{} endpoint returned a non-object body",
            endpoint
        )));
    };

    match body.remove(DATA_FIELD) {
        Some(Value::Array(entries)) => Ok(entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Object(fields) => Some(fields),
                other => {
                    warn!(endpoint, entry = %other, "Dropping non-object entry");
                    None
                }
            })
            .collect()),
        _ => Err(ScraperError::UnableToReachUrl(format!(
            "Unable to get game information: {} response has no {} array",
            endpoint, DATA_FIELD
        ))),
    }
}
