//! Zonegate Domain Layer
pub mod answer;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_request;
pub mod domain_name;
pub mod errors;
pub mod zone;

pub use answer::{Answer, AnswerSet, ResponseCode};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::{MxData, RecordData, RecordType, SrvData};
pub use dns_request::DnsRequest;
pub use domain_name::DomainName;
pub use errors::{AdmissionDenial, DomainError};
pub use zone::{ZoneDocument, ZoneEntry, ZoneFileEntry, DEFAULT_TTL};
