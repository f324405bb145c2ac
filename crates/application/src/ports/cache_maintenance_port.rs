use async_trait::async_trait;
use zonegate_domain::DomainError;

/// Outcome of one cache sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheSweepOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Port for periodic cache housekeeping.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Drops every expired entry.
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError>;
}
