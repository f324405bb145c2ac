#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use zonegate_application::ports::{CacheMaintenancePort, CacheSweepOutcome};
use zonegate_domain::DomainError;

#[derive(Default)]
pub struct MockCacheMaintenancePort {
    sweep_calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn sweep_call_count(&self) -> usize {
        self.sweep_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError> {
        self.sweep_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::UpstreamError("mock sweep failure".to_string()));
        }
        Ok(CacheSweepOutcome {
            entries_removed: 1,
            cache_size: 0,
        })
    }
}
