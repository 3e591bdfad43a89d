//! Test Helper Utilities
//!
//! In-process fake of the Roblox endpoints for pipeline tests

use async_trait::async_trait;
use gpyro_scraper::config::ScraperConfig;
use gpyro_scraper::models::{PlaceId, UniverseId};
use gpyro_scraper::services::RobloxApi;
use gpyro_scraper::ClientError;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted response of the lookup endpoint for one place id
#[derive(Debug, Clone)]
pub enum LookupBehavior {
    Resolve(u64),
    Status(u16),
    Timeout,
    MissingField,
}

/// Fake Roblox API recording every call
#[derive(Default)]
pub struct FakeRobloxApi {
    lookups: HashMap<PlaceId, LookupBehavior>,
    lookup_delay: Duration,
    place_delays: HashMap<PlaceId, Duration>,
    votes_without_data: bool,
    pub lookup_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub games_calls: Mutex<Vec<Vec<UniverseId>>>,
    pub votes_calls: Mutex<Vec<Vec<UniverseId>>>,
}

impl FakeRobloxApi {
    /// Place id `n` resolves to universe id `n * 10` for every `n` in `place_ids`
    pub fn resolving(place_ids: impl IntoIterator<Item = u64>) -> Self {
        let mut fake = Self::default();
        for id in place_ids {
            fake.lookups.insert(PlaceId(id), LookupBehavior::Resolve(id * 10));
        }
        fake
    }

    pub fn with_lookup(mut self, place_id: u64, behavior: LookupBehavior) -> Self {
        self.lookups.insert(PlaceId(place_id), behavior);
        self
    }

    pub fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = delay;
        self
    }

    /// Delay for one place id, overriding the shared lookup delay
    pub fn with_place_delay(mut self, place_id: u64, delay: Duration) -> Self {
        self.place_delays.insert(PlaceId(place_id), delay);
        self
    }

    pub fn with_votes_missing_data(mut self) -> Self {
        self.votes_without_data = true;
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub fn max_concurrent_lookups(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn games_calls(&self) -> Vec<Vec<UniverseId>> {
        self.games_calls.lock().unwrap().clone()
    }

    pub fn votes_calls(&self) -> Vec<Vec<UniverseId>> {
        self.votes_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RobloxApi for FakeRobloxApi {
    async fn lookup_universe(&self, place_id: PlaceId) -> Result<Value, ClientError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = self
            .place_delays
            .get(&place_id)
            .copied()
            .unwrap_or(self.lookup_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let response = match self.lookups.get(&place_id) {
            Some(LookupBehavior::Resolve(universe_id)) => Ok(json!({ "universeId": universe_id })),
            Some(LookupBehavior::Status(code)) => Err(ClientError::Status(*code)),
            Some(LookupBehavior::Timeout) => Err(ClientError::Timeout("deadline elapsed".to_string())),
            Some(LookupBehavior::MissingField) | None => Ok(json!({ "errors": [{ "code": 0 }] })),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }

    async fn fetch_games(&self, universe_ids: &[UniverseId]) -> Result<Value, ClientError> {
        self.games_calls.lock().unwrap().push(universe_ids.to_vec());

        let data: Vec<Value> = universe_ids
            .iter()
            .map(|id| json!({ "id": id.0, "name": format!("Game {}", id.0), "playing": id.0 * 3 }))
            .collect();
        Ok(json!({ "data": data }))
    }

    async fn fetch_votes(&self, universe_ids: &[UniverseId]) -> Result<Value, ClientError> {
        self.votes_calls.lock().unwrap().push(universe_ids.to_vec());

        if self.votes_without_data {
            return Ok(json!({ "errors": [{ "code": 0, "message": "Too many requests" }] }));
        }

        // Reverse order to make positional matching detectable
        let data: Vec<Value> = universe_ids
            .iter()
            .rev()
            .map(|id| json!({ "id": id.0, "upVotes": id.0 + 1, "downVotes": 1 }))
            .collect();
        Ok(json!({ "data": data }))
    }
}

/// Fast configuration: high request rate, no jitter
pub fn test_config(max_concurrent_requests: usize, ignore_failures: bool) -> ScraperConfig {
    let mut config = ScraperConfig::new(1000.0);
    config.max_concurrent_requests = max_concurrent_requests;
    config.max_jitter = Duration::ZERO;
    config.ignore_failures = ignore_failures;
    config
}

pub fn place_ids(ids: impl IntoIterator<Item = u64>) -> Vec<PlaceId> {
    ids.into_iter().map(PlaceId).collect()
}
