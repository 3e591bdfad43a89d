//! Fetch pipeline services

pub mod batch_fetcher;
pub mod concurrency_gate;
pub mod game_data_pipeline;
pub mod game_data_writer;
pub mod identifier_resolver;
pub mod joiner;
pub mod rate_limiter;
pub mod result_cache;
pub mod roblox_client;
pub mod rolimons_client;

pub use batch_fetcher::{BatchFetcher, Batches};
pub use concurrency_gate::{ConcurrencyGate, GatePermit};
pub use game_data_pipeline::GameDataPipeline;
pub use game_data_writer::{save_catalog, save_game_data};
pub use identifier_resolver::{unique_universe_ids, IdentifierResolver, LookupOutcome};
pub use joiner::{join, JoinStrategy};
pub use rate_limiter::RateLimiter;
pub use result_cache::{CachedResults, ResultCache};
pub use roblox_client::{join_ids, RobloxApi, RobloxClient};
pub use rolimons_client::{parse_catalog, RolimonsClient};
