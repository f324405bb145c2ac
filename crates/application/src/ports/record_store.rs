use zonegate_domain::{DomainName, ZoneEntry};

/// Read-only view of the local zone.
///
/// Built once at startup and never mutated, so lookups need no locking.
pub trait RecordStore: Send + Sync {
    fn lookup(&self, domain: &DomainName) -> Option<&ZoneEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
