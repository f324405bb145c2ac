use super::key::CacheKey;
use super::metrics::{CacheMetrics, CacheMetricsSnapshot};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use zonegate_application::ports::ResponseCachePort;
use zonegate_domain::{AnswerSet, DomainName, RecordType};

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub answers: AnswerSet,
    pub expires_at: Instant,
}

impl CacheEntry {
    #[inline]
    pub fn is_live_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Sharded TTL cache of upstream answers.
///
/// Expired entries are removed lazily on read; `purge_expired` sweeps the
/// rest. Time comes from `tokio::time` so paused-clock tests control expiry.
pub struct ResponseCache {
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
    metrics: CacheMetrics,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            metrics: CacheMetrics::default(),
        }
    }

    pub fn get(&self, domain: &DomainName, record_type: RecordType) -> Option<AnswerSet> {
        let key = CacheKey::new(domain.clone(), record_type);
        let now = Instant::now();

        {
            let Some(entry) = self.entries.get(&key) else {
                self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
                return None;
            };
            if entry.is_live_at(now) {
                self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
                return Some(entry.answers.clone());
            }
        }

        // Re-checked under the shard lock: a concurrent put may have replaced it.
        if self
            .entries
            .remove_if(&key, |_, entry| !entry.is_live_at(now))
            .is_some()
        {
            self.metrics.expirations.fetch_add(1, AtomicOrdering::Relaxed);
            debug!(key = %key, "Expired cache entry removed on read");
        }
        self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
        None
    }

    pub fn put(&self, domain: DomainName, record_type: RecordType, answers: AnswerSet, ttl_secs: u32) {
        let key = CacheKey::new(domain, record_type);
        let expires_at = Instant::now() + Duration::from_secs(u64::from(ttl_secs));

        debug!(key = %key, ttl = ttl_secs, answers = answers.len(), "Caching answer");
        self.entries.insert(key, CacheEntry { answers, expires_at });
        self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0usize;
        self.entries.retain(|_, entry| {
            let live = entry.is_live_at(now);
            if !live {
                removed += 1;
            }
            live
        });

        self.metrics
            .expirations
            .fetch_add(removed as u64, AtomicOrdering::Relaxed);
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metrics(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCachePort for ResponseCache {
    fn get(&self, domain: &DomainName, record_type: RecordType) -> Option<AnswerSet> {
        ResponseCache::get(self, domain, record_type)
    }

    fn put(&self, domain: DomainName, record_type: RecordType, answers: AnswerSet, ttl_secs: u32) {
        ResponseCache::put(self, domain, record_type, answers, ttl_secs)
    }

    fn len(&self) -> usize {
        ResponseCache::len(self)
    }
}
