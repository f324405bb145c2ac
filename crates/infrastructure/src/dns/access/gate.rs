use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use ipnetwork::IpNetwork;
use rustc_hash::FxBuildHasher;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use zonegate_application::ports::AccessGate;

pub const DEFAULT_RATE_LIMIT: u32 = 100;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

type Counters = DashMap<IpAddr, u32, FxBuildHasher>;

/// Allow-list check plus a per-client sliding-window request counter.
///
/// Every admitted request bumps the client's counter and schedules one
/// decrement `window` later on the Tokio runtime, so the counter tracks the
/// number of requests seen in the last window. `admit` must therefore be
/// called from within a runtime.
pub struct ClientAccessGate {
    allowed: Vec<IpNetwork>,
    limit: u32,
    window: Duration,
    counters: Arc<Counters>,
}

impl ClientAccessGate {
    pub fn new(allowed: Vec<IpNetwork>) -> Self {
        Self {
            allowed,
            limit: DEFAULT_RATE_LIMIT,
            window: DEFAULT_WINDOW,
            counters: Arc::new(DashMap::with_hasher(FxBuildHasher)),
        }
    }

    pub fn with_rate_limit(mut self, limit: u32, window: Duration) -> Self {
        self.limit = limit;
        self.window = window;
        self
    }

    /// Requests counted for `client` inside the current window.
    pub fn in_flight(&self, client: IpAddr) -> u32 {
        self.counters
            .get(&client.to_canonical())
            .map(|count| *count)
            .unwrap_or(0)
    }

    /// Number of clients with a live counter.
    pub fn tracked_clients(&self) -> usize {
        self.counters.len()
    }

    fn release(counters: &Counters, client: IpAddr) {
        if let Entry::Occupied(mut entry) = counters.entry(client) {
            let count = entry.get_mut();
            *count = count.saturating_sub(1);
            if *count == 0 {
                entry.remove();
            }
        }
    }
}

impl AccessGate for ClientAccessGate {
    fn is_allowed(&self, client: IpAddr) -> bool {
        let client = client.to_canonical();
        self.allowed.iter().any(|network| network.contains(client))
    }

    fn admit(&self, client: IpAddr) -> bool {
        let client = client.to_canonical();

        // The entry guard holds the shard lock, so concurrent requests from
        // one client are counted one at a time.
        let count = {
            let mut count = self.counters.entry(client).or_insert(0);
            *count = count.saturating_add(1);
            *count
        };

        let counters = Arc::clone(&self.counters);
        let window = self.window;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            Self::release(&counters, client);
        });

        let admitted = count <= self.limit;
        if !admitted {
            debug!(client = %client, count, limit = self.limit, "Client over rate limit");
        }
        admitted
    }
}
