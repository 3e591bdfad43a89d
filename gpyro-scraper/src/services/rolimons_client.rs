//! Rolimons game list client
//!
//! Single unpaginated GET of the full game list.

use crate::error::{ScraperError, ScraperResult};
use crate::models::{PlaceId, RolimonsCatalog, RolimonsGameMetadata};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

const USER_AGENT: &str = "gpyro/0.1.0";

pub struct RolimonsClient {
    http_client: reqwest::Client,
    url: String,
}

impl RolimonsClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> ScraperResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ScraperError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    /// Fetch and parse the full game list
    pub async fn fetch_catalog(&self) -> ScraperResult<RolimonsCatalog> {
        info!(url = %self.url, "Getting all of Rolimons' game data");

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ScraperError::UnableToReachUrl(format!("{}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnableToReachUrl(format!(
                "{} returned {}",
                self.url, status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ScraperError::UnableToReachUrl(format!("{}: {}", self.url, e)))?;

        let catalog = parse_catalog(body)?;
        info!(
            game_count = catalog.game_count(),
            entries = catalog.games().len(),
            "Successfully got all of Rolimons' game data"
        );
        Ok(catalog)
    }
}

/// Parse `{"game_count": n, "games": {"<place_id>": [name, players, thumbnail]}}`
///
/// Malformed entries are skipped with a warning.
pub fn parse_catalog(body: Value) -> ScraperResult<RolimonsCatalog> {
    let game_count = body.get("game_count").and_then(Value::as_u64).ok_or_else(|| {
        ScraperError::UnableToReachUrl(
            "Unable to get the game information (game_count missing)".to_string(),
        )
    })?;

    let games = match body.get("games") {
        Some(Value::Object(games)) => games
            .iter()
            .filter_map(|(key, entry)| {
                let parsed = key.parse::<u64>().ok().zip(parse_entry(entry));
                if parsed.is_none() {
                    warn!(place_id = %key, "Skipping malformed Rolimons entry");
                }
                parsed.map(|(id, metadata)| (PlaceId(id), metadata))
            })
            .collect(),
        _ => {
            return Err(ScraperError::UnableToReachUrl(
                "Unable to get the game information (games missing)".to_string(),
            ))
        }
    };

    Ok(RolimonsCatalog::new(game_count, games))
}

fn parse_entry(entry: &Value) -> Option<RolimonsGameMetadata> {
    match entry.as_array()?.as_slice() {
        [name, active_players, thumbnail] => Some(RolimonsGameMetadata {
            name: name.as_str()?.to_string(),
            active_players: active_players.as_u64()?,
            thumbnail_download_url: thumbnail.as_str().unwrap_or_default().to_string(),
        }),
        _ => None,
    }
}
