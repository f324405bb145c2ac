pub mod access;
pub mod cache;
pub mod cache_maintenance;
pub mod forwarding;
pub mod record_store;
pub mod server;
pub mod transport;

pub use access::ClientAccessGate;
pub use cache::{CacheKey, CacheMetrics, ResponseCache};
pub use cache_maintenance::ResponseCacheMaintenance;
pub use forwarding::UdpUpstreamResolver;
pub use record_store::InMemoryRecordStore;
pub use server::DnsServerHandler;
