use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use zonegate_application::ports::CacheMaintenancePort;

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Periodically drops expired entries from the response cache.
pub struct CacheMaintenanceJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    sweep_interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheMaintenanceJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, sweep_secs: u64) -> Self {
        self.sweep_interval_secs = sweep_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(
            interval_secs = self.sweep_interval_secs,
            "Starting cache maintenance background job"
        );

        let job = Arc::clone(&self);
        tokio::spawn(async move {
            let period = Duration::from_secs(job.sweep_interval_secs);
            // First tick one period after start.
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = job.shutdown.cancelled() => {
                        info!("CacheMaintenanceJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match job.maintenance.run_sweep_cycle().await {
                            Ok(outcome) => {
                                if outcome.entries_removed > 0 {
                                    info!(
                                        entries_removed = outcome.entries_removed,
                                        cache_size = outcome.cache_size,
                                        "Cache sweep cycle completed"
                                    );
                                }
                            }
                            Err(e) => {
                                error!(error = %e, "Cache sweep cycle failed");
                            }
                        }
                    }
                }
            }
        })
    }
}
