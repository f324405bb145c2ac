use std::fmt;
use zonegate_domain::{DomainName, RecordType};

/// Cache key: an answer for one type is never served to another.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: DomainName,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(domain: DomainName, record_type: RecordType) -> Self {
        Self {
            domain,
            record_type,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.record_type)
    }
}
