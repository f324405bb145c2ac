mod access_gate;
mod cache_maintenance_port;
mod record_store;
mod response_cache_port;
mod upstream_resolver;

pub use access_gate::AccessGate;
pub use cache_maintenance_port::{CacheMaintenancePort, CacheSweepOutcome};
pub use record_store::RecordStore;
pub use response_cache_port::ResponseCachePort;
pub use upstream_resolver::UpstreamResolver;

// Re-export for convenience
pub use zonegate_domain::{AnswerSet, DnsQuery};
