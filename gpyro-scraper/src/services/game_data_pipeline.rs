//! Place ids → joined game records
//!
//! Sequence: validate amount → resolve → dedupe → batch fetch → join → cache.
//! The cache is only written once every stage has succeeded.

use crate::config::{validate_amount, ScraperConfig};
use crate::error::{ScraperError, ScraperResult};
use crate::models::{PlaceId, ResultSet};
use crate::services::batch_fetcher::BatchFetcher;
use crate::services::concurrency_gate::ConcurrencyGate;
use crate::services::identifier_resolver::{unique_universe_ids, IdentifierResolver};
use crate::services::joiner;
use crate::services::rate_limiter::RateLimiter;
use crate::services::result_cache::ResultCache;
use crate::services::roblox_client::RobloxApi;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct GameDataPipeline {
    config: ScraperConfig,
    resolver: IdentifierResolver,
    batch_fetcher: BatchFetcher,
    cache: ResultCache,
}

impl GameDataPipeline {
    /// Build the pipeline; fails on invalid configuration
    pub fn new(config: ScraperConfig, api: Arc<dyn RobloxApi>) -> ScraperResult<Self> {
        config.validate()?;

        let gate = ConcurrencyGate::new(config.max_concurrent_requests);
        let rate_limiter = RateLimiter::new(config.base_delay(), config.max_jitter);

        Ok(Self {
            resolver: IdentifierResolver::new(Arc::clone(&api), gate, rate_limiter),
            batch_fetcher: BatchFetcher::new(api),
            cache: ResultCache::new(),
            config,
        })
    }

    /// Shared handle to the result cache
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Run the pipeline over the first `config.amount` place ids
    ///
    /// Cancelling `cancel` aborts in-flight lookups and returns
    /// [`ScraperError::Cancelled`]; the cache is left untouched.
    pub async fn get_games(
        &self,
        place_ids: &[PlaceId],
        cancel: &CancellationToken,
    ) -> ScraperResult<Arc<ResultSet>> {
        let amount = validate_amount(self.config.amount, place_ids.len())?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Game data fetch cancelled");
                Err(ScraperError::Cancelled)
            }
            result = self.run(&place_ids[..amount]) => result,
        }
    }

    async fn run(&self, place_ids: &[PlaceId]) -> ScraperResult<Arc<ResultSet>> {
        let outcomes = self
            .resolver
            .resolve_all(place_ids, self.config.ignore_failures)
            .await?;

        let universe_ids = unique_universe_ids(&outcomes);
        let batches = self.batch_fetcher.fetch(&universe_ids).await?;

        let (records, _strategy) = joiner::join(batches.games, batches.votes);
        let results = self.cache.store(records).await;

        info!(records = results.len(), "Successfully got all Roblox game data");
        Ok(results)
    }
}
