pub mod key;
pub mod metrics;
pub mod storage;

pub use key::CacheKey;
pub use metrics::CacheMetrics;
pub use storage::{CacheEntry, ResponseCache};
