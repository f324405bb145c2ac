use super::cache::ResponseCache;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use zonegate_application::ports::{CacheMaintenancePort, CacheSweepOutcome};
use zonegate_domain::DomainError;

/// Infrastructure adapter implementing `CacheMaintenancePort`.
pub struct ResponseCacheMaintenance {
    cache: Arc<ResponseCache>,
}

impl ResponseCacheMaintenance {
    pub fn new(cache: Arc<ResponseCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CacheMaintenancePort for ResponseCacheMaintenance {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError> {
        let entries_removed = self.cache.purge_expired();
        let cache_size = self.cache.len();
        let metrics = self.cache.metrics();

        debug!(
            entries_removed,
            cache_size,
            hits = metrics.hits,
            misses = metrics.misses,
            hit_rate = metrics.hit_rate,
            "Cache sweep finished"
        );

        Ok(CacheSweepOutcome {
            entries_removed,
            cache_size,
        })
    }
}
