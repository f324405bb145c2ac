use crate::dns_record::{RecordData, RecordType};
use crate::domain_name::DomainName;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub name: DomainName,
    pub record_type: RecordType,
    pub ttl: u32,
    pub data: RecordData,
}

impl Answer {
    pub fn new(name: DomainName, ttl: u32, data: RecordData) -> Self {
        Self {
            name,
            record_type: data.record_type(),
            ttl,
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Other(u16),
}

impl ResponseCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NxDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The answer section of one response plus its response code.
///
/// Records sit behind an `Arc` so cache hits hand out clones without
/// copying the records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    pub records: Arc<[Answer]>,
    pub response_code: ResponseCode,
    /// Set when the upstream answer came back with TC: the records are partial.
    pub truncated: bool,
}

impl AnswerSet {
    pub fn new(records: Vec<Answer>) -> Self {
        Self {
            records: Arc::from(records),
            response_code: ResponseCode::NoError,
            truncated: false,
        }
    }

    pub fn with_response_code(records: Vec<Answer>, response_code: ResponseCode) -> Self {
        Self {
            records: Arc::from(records),
            response_code,
            truncated: false,
        }
    }

    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_ttl(&self) -> Option<u32> {
        self.records.iter().map(|answer| answer.ttl).min()
    }

    /// Whether the set may be stored in the response cache.
    pub fn is_cacheable(&self) -> bool {
        self.response_code == ResponseCode::NoError && !self.truncated && !self.is_empty()
    }
}
