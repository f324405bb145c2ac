use zonegate_domain::{AnswerSet, DomainName, RecordType};

/// TTL-bounded store of upstream answers keyed by `(domain, record type)`.
pub trait ResponseCachePort: Send + Sync {
    /// Returns the stored answer while it is still live. Expired entries
    /// are reported absent.
    fn get(&self, domain: &DomainName, record_type: RecordType) -> Option<AnswerSet>;

    /// Replaces any existing entry for the key.
    fn put(&self, domain: DomainName, record_type: RecordType, answers: AnswerSet, ttl_secs: u32);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
