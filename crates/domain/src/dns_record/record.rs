use super::RecordType;
use crate::domain_name::DomainName;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxData {
    pub exchange: DomainName,
    pub priority: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvData {
    pub target: DomainName,
    pub port: u16,
    pub priority: u16,
    pub weight: u16,
}

/// Typed record payload, one variant per implemented record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CNAME(DomainName),
    MX(MxData),
    NS(DomainName),
    TXT(String),
    PTR(DomainName),
    SRV(SrvData),
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::AAAA(_) => RecordType::AAAA,
            RecordData::CNAME(_) => RecordType::CNAME,
            RecordData::MX(_) => RecordType::MX,
            RecordData::NS(_) => RecordType::NS,
            RecordData::TXT(_) => RecordType::TXT,
            RecordData::PTR(_) => RecordType::PTR,
            RecordData::SRV(_) => RecordType::SRV,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{}", addr),
            RecordData::AAAA(addr) => write!(f, "{}", addr),
            RecordData::CNAME(name) | RecordData::NS(name) | RecordData::PTR(name) => {
                write!(f, "{}", name)
            }
            RecordData::MX(mx) => write!(f, "{} {}", mx.priority, mx.exchange),
            RecordData::TXT(text) => write!(f, "\"{}\"", text),
            RecordData::SRV(srv) => write!(
                f,
                "{} {} {} {}",
                srv.priority, srv.weight, srv.port, srv.target
            ),
        }
    }
}
