//! Place id → universe id resolution
//!
//! One task per place id is spawned into a `JoinSet`. Each task takes a gate
//! permit, waits out the rate limiter and issues the lookup. Tasks return their
//! own outcome; nothing is shared between them.
//!
//! Failure policy:
//! - timeout: always a soft failure
//! - non-2xx status, missing `universeId`, other transport or parse errors:
//!   soft failure when `ignore_failures` is set, fatal otherwise
//!
//! The first fatal failure aborts every outstanding lookup and the whole call
//! fails; no partial outcome list is returned.

use crate::error::{ClientError, ScraperError, ScraperResult};
use crate::models::{PlaceId, ResolutionOutcome, UniverseId};
use crate::services::concurrency_gate::ConcurrencyGate;
use crate::services::rate_limiter::RateLimiter;
use crate::services::roblox_client::RobloxApi;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

const UNIVERSE_ID_FIELD: &str = "universeId";

/// Per-item lookup result before the batch-level policy is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Resolved(UniverseId),
    SoftFailure(String),
    FatalFailure(String),
}

impl LookupOutcome {
    /// Soft or fatal depending on `ignore_failures`
    fn policy_failure(ignore_failures: bool, reason: String) -> Self {
        if ignore_failures {
            LookupOutcome::SoftFailure(reason)
        } else {
            LookupOutcome::FatalFailure(reason)
        }
    }

    /// Classify a lookup response
    pub fn from_response(response: Result<Value, ClientError>, ignore_failures: bool) -> Self {
        match response {
            Ok(body) => match body.get(UNIVERSE_ID_FIELD).and_then(Value::as_u64) {
                Some(id) => LookupOutcome::Resolved(UniverseId(id)),
                None => Self::policy_failure(
                    ignore_failures,
                    format!("response has no {} field", UNIVERSE_ID_FIELD),
                ),
            },
            Err(ClientError::Timeout(msg)) => LookupOutcome::SoftFailure(format!("timed out: {}", msg)),
            Err(e) => Self::policy_failure(ignore_failures, e.to_string()),
        }
    }
}

/// Resolves place ids concurrently through the gate
#[derive(Clone)]
pub struct IdentifierResolver {
    api: Arc<dyn RobloxApi>,
    gate: ConcurrencyGate,
    rate_limiter: RateLimiter,
}

impl IdentifierResolver {
    pub fn new(api: Arc<dyn RobloxApi>, gate: ConcurrencyGate, rate_limiter: RateLimiter) -> Self {
        Self {
            api,
            gate,
            rate_limiter,
        }
    }

    /// Resolve every place id
    ///
    /// Outcomes are in completion order. Tolerated failures are included with
    /// `universe_id: None`.
    pub async fn resolve_all(
        &self,
        place_ids: &[PlaceId],
        ignore_failures: bool,
    ) -> ScraperResult<Vec<ResolutionOutcome>> {
        info!(
            count = place_ids.len(),
            max_concurrent = self.gate.max_concurrent(),
            "Converting Roblox place ids to universe ids"
        );

        let mut tasks = JoinSet::new();
        for &place_id in place_ids {
            let resolver = self.clone();
            tasks.spawn(async move {
                let outcome = resolver.resolve_one(place_id, ignore_failures).await;
                (place_id, outcome)
            });
        }

        let mut outcomes = Vec::with_capacity(place_ids.len());
        let mut soft_failures = 0usize;

        while let Some(joined) = tasks.join_next().await {
            let (place_id, outcome) =
                joined.map_err(|e| ScraperError::Internal(format!("Lookup task failed: {}", e)))?;

            match outcome {
                LookupOutcome::Resolved(universe_id) => {
                    debug!(place_id = %place_id, universe_id = %universe_id, "Resolved place id");
                    outcomes.push(ResolutionOutcome::resolved(place_id, universe_id));
                }
                LookupOutcome::SoftFailure(reason) => {
                    warn!(place_id = %place_id, reason = %reason, "Skipping place id");
                    soft_failures += 1;
                    outcomes.push(ResolutionOutcome::failed(place_id, reason));
                }
                LookupOutcome::FatalFailure(reason) => {
                    tasks.abort_all();
                    return Err(ScraperError::Lookup { place_id, reason });
                }
            }
        }

        info!(
            resolved = outcomes.len() - soft_failures,
            skipped = soft_failures,
            "Finished converting place ids"
        );

        Ok(outcomes)
    }

    async fn resolve_one(&self, place_id: PlaceId, ignore_failures: bool) -> LookupOutcome {
        let _permit = self.gate.acquire().await;
        self.rate_limiter.wait().await;

        let response = self.api.lookup_universe(place_id).await;
        LookupOutcome::from_response(response, ignore_failures)
    }
}

/// Resolved universe ids, deduplicated, in first-seen order
pub fn unique_universe_ids(outcomes: &[ResolutionOutcome]) -> Vec<UniverseId> {
    let mut seen = HashSet::new();
    outcomes
        .iter()
        .filter_map(|o| o.universe_id)
        .filter(|id| seen.insert(*id))
        .collect()
}
