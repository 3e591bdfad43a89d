//! Roblox API client
//!
//! Three endpoints are used: the place → universe lookup and the two bulk
//! endpoints (game metadata, votes). The client only moves JSON; presence
//! checks on the payload belong to the resolver and batch fetcher.

use crate::error::{ClientError, ScraperError};
use crate::models::{PlaceId, UniverseId};
use async_trait::async_trait;
use gpyro_common::config::EndpointConfig;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = "gpyro/0.1.0";

/// Transport seam for the Roblox endpoints
#[async_trait]
pub trait RobloxApi: Send + Sync {
    /// `GET <lookup>/{place_id}/universe`
    async fn lookup_universe(&self, place_id: PlaceId) -> Result<Value, ClientError>;

    /// `GET <games>?universeIds=<comma-joined>`
    async fn fetch_games(&self, universe_ids: &[UniverseId]) -> Result<Value, ClientError>;

    /// `GET <votes>?universeIds=<comma-joined>`
    async fn fetch_votes(&self, universe_ids: &[UniverseId]) -> Result<Value, ClientError>;
}

/// Comma-joined id list used by the bulk endpoints
pub fn join_ids(universe_ids: &[UniverseId]) -> String {
    universe_ids
        .iter()
        .map(UniverseId::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// reqwest-backed Roblox client
pub struct RobloxClient {
    http_client: reqwest::Client,
    endpoints: EndpointConfig,
}

impl RobloxClient {
    pub fn new(endpoints: EndpointConfig, timeout: Duration) -> Result<Self, ScraperError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ScraperError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoints,
        })
    }

    fn lookup_url(&self, place_id: PlaceId) -> String {
        self.endpoints
            .lookup_url
            .replace("{place_id}", &place_id.to_string())
    }

    async fn get_json(&self, url: &str) -> Result<Value, ClientError> {
        tracing::debug!(url = %url, "GET");

        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        response.json::<Value>().await.map_err(ClientError::from)
    }

    async fn get_bulk(&self, base: &str, universe_ids: &[UniverseId]) -> Result<Value, ClientError> {
        let url = format!("{}?universeIds={}", base, join_ids(universe_ids));
        self.get_json(&url).await
    }
}

#[async_trait]
impl RobloxApi for RobloxClient {
    async fn lookup_universe(&self, place_id: PlaceId) -> Result<Value, ClientError> {
        let url = self.lookup_url(place_id);
        self.get_json(&url).await
    }

    async fn fetch_games(&self, universe_ids: &[UniverseId]) -> Result<Value, ClientError> {
        self.get_bulk(&self.endpoints.games_url, universe_ids).await
    }

    async fn fetch_votes(&self, universe_ids: &[UniverseId]) -> Result<Value, ClientError> {
        self.get_bulk(&self.endpoints.votes_url, universe_ids).await
    }
}
