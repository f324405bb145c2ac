use std::net::IpAddr;

/// Allow-list membership and per-client rate limiting.
pub trait AccessGate: Send + Sync {
    fn is_allowed(&self, client: IpAddr) -> bool;

    /// Counts one request for `client` and reports whether it stays within
    /// the limit. A rejected request still occupies a slot until its
    /// window elapses.
    fn admit(&self, client: IpAddr) -> bool;
}
