use crate::dns_query::DnsQuery;
use crate::dns_record::RecordType;
use crate::domain_name::DomainName;
use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub domain: DomainName,
    pub record_type: RecordType,
    /// Question name exactly as the client sent it.
    pub wire_name: Arc<str>,
    pub client_ip: IpAddr,
    pub received_at: DateTime<Utc>,
}

impl DnsRequest {
    pub fn new(domain: DomainName, record_type: RecordType, client_ip: IpAddr) -> Self {
        let wire_name = Arc::from(domain.to_fqdn());
        Self {
            domain,
            record_type,
            wire_name,
            client_ip,
            received_at: Utc::now(),
        }
    }

    pub fn with_wire_name(mut self, wire_name: impl Into<Arc<str>>) -> Self {
        self.wire_name = wire_name.into();
        self
    }

    pub fn query(&self) -> DnsQuery {
        DnsQuery::new(self.domain.clone(), self.record_type).with_wire_name(self.wire_name.clone())
    }
}
