use crate::dns_record::RecordType;
use crate::domain_name::DomainName;
use std::sync::Arc;

/// A question as forwarded upstream: name and type, never rewritten.
///
/// `domain` is the normalized key; `wire_name` keeps the client's spelling
/// and is what goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: DomainName,
    pub record_type: RecordType,
    pub wire_name: Arc<str>,
}

impl DnsQuery {
    pub fn new(domain: DomainName, record_type: RecordType) -> Self {
        let wire_name = Arc::from(domain.to_fqdn());
        Self {
            domain,
            record_type,
            wire_name,
        }
    }

    pub fn with_wire_name(mut self, wire_name: impl Into<Arc<str>>) -> Self {
        self.wire_name = wire_name.into();
        self
    }
}
