//! Last successful result set
//!
//! The set is swapped in as a whole behind an `Arc`, so readers see either
//! the previous set or the new one.

use crate::models::ResultSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// What the cache currently holds
#[derive(Debug, Clone, PartialEq)]
pub enum CachedResults {
    Empty,
    Populated(Arc<ResultSet>),
}

impl CachedResults {
    pub fn is_empty(&self) -> bool {
        matches!(self, CachedResults::Empty)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    inner: Arc<RwLock<Option<Arc<ResultSet>>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached set, returning the stored handle
    pub async fn store(&self, results: ResultSet) -> Arc<ResultSet> {
        let results = Arc::new(results);
        *self.inner.write().await = Some(Arc::clone(&results));
        results
    }

    pub async fn retrieve(&self) -> CachedResults {
        match self.inner.read().await.as_ref() {
            Some(results) => CachedResults::Populated(Arc::clone(results)),
            None => CachedResults::Empty,
        }
    }
}
