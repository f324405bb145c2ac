//! Mapping between `zonegate_domain` record types/data and `hickory_proto` ones.
//!
//! The wire side of the server and the upstream parser both go through
//! here, so the conversion lives in one place.

use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, PTR, SRV, TXT};
use hickory_proto::rr::{Name, RData, Record, RecordType as HickoryRecordType};
use tracing::debug;
use zonegate_domain::{Answer, DomainError, DomainName, MxData, RecordData, RecordType, SrvData};

/// Longest character-string a TXT record can carry.
const TXT_CHUNK_LEN: usize = 255;

/// Bidirectional mapper between domain and hickory record types
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::PTR => HickoryRecordType::PTR,
            RecordType::SRV => HickoryRecordType::SRV,
            RecordType::Unimplemented(code) => HickoryRecordType::from(*code),
        }
    }

    /// Total: every type outside the implemented set keeps its wire code.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        match hickory_type {
            HickoryRecordType::A => RecordType::A,
            HickoryRecordType::AAAA => RecordType::AAAA,
            HickoryRecordType::CNAME => RecordType::CNAME,
            HickoryRecordType::MX => RecordType::MX,
            HickoryRecordType::NS => RecordType::NS,
            HickoryRecordType::TXT => RecordType::TXT,
            HickoryRecordType::PTR => RecordType::PTR,
            HickoryRecordType::SRV => RecordType::SRV,
            other => RecordType::Unimplemented(u16::from(other)),
        }
    }

    pub fn to_name(domain: &DomainName) -> Result<Name, DomainError> {
        Name::from_ascii(domain.to_fqdn()).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })
    }

    /// Parses a question name without normalizing it, so case survives.
    pub fn wire_name(raw: &str) -> Result<Name, DomainError> {
        Name::from_ascii(raw).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", raw, e))
        })
    }

    pub fn from_name(name: &Name) -> Result<DomainName, DomainError> {
        DomainName::new(&name.to_ascii())
    }

    pub fn to_rdata(data: &RecordData) -> Result<RData, DomainError> {
        let rdata = match data {
            RecordData::A(ip) => RData::A(A(*ip)),
            RecordData::AAAA(ip) => RData::AAAA(AAAA(*ip)),
            RecordData::CNAME(target) => RData::CNAME(CNAME(Self::to_name(target)?)),
            RecordData::NS(target) => RData::NS(NS(Self::to_name(target)?)),
            RecordData::PTR(target) => RData::PTR(PTR(Self::to_name(target)?)),
            RecordData::MX(mx) => RData::MX(MX::new(mx.priority, Self::to_name(&mx.exchange)?)),
            RecordData::TXT(text) => RData::TXT(TXT::new(split_txt(text))),
            RecordData::SRV(srv) => RData::SRV(SRV::new(
                srv.priority,
                srv.weight,
                srv.port,
                Self::to_name(&srv.target)?,
            )),
        };
        Ok(rdata)
    }

    /// Returns `None` for record data outside the implemented set.
    pub fn from_rdata(rdata: &RData) -> Option<RecordData> {
        let data = match rdata {
            RData::A(a) => RecordData::A(a.0),
            RData::AAAA(aaaa) => RecordData::AAAA(aaaa.0),
            RData::CNAME(cname) => RecordData::CNAME(Self::from_name(&cname.0).ok()?),
            RData::NS(ns) => RecordData::NS(Self::from_name(&ns.0).ok()?),
            RData::PTR(ptr) => RecordData::PTR(Self::from_name(&ptr.0).ok()?),
            RData::MX(mx) => RecordData::MX(MxData {
                exchange: Self::from_name(mx.exchange()).ok()?,
                priority: mx.preference(),
            }),
            RData::TXT(txt) => RecordData::TXT(
                txt.txt_data()
                    .iter()
                    .map(|chunk| String::from_utf8_lossy(chunk))
                    .collect(),
            ),
            RData::SRV(srv) => RecordData::SRV(SrvData {
                target: Self::from_name(srv.target()).ok()?,
                port: srv.port(),
                priority: srv.priority(),
                weight: srv.weight(),
            }),
            _ => return None,
        };
        Some(data)
    }

    pub fn to_record(answer: &Answer) -> Result<Record, DomainError> {
        Ok(Record::from_rdata(
            Self::to_name(&answer.name)?,
            answer.ttl,
            Self::to_rdata(&answer.data)?,
        ))
    }

    pub fn from_record(record: &Record) -> Option<Answer> {
        let Some(data) = Self::from_rdata(record.data()) else {
            debug!(
                name = %record.name(),
                record_type = ?record.record_type(),
                "Skipping unsupported answer record"
            );
            return None;
        };
        let name = Self::from_name(record.name()).ok()?;
        Some(Answer::new(name, record.ttl(), data))
    }
}

fn split_txt(text: &str) -> Vec<String> {
    if text.len() <= TXT_CHUNK_LEN {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if current.len() + ch.len_utf8() > TXT_CHUNK_LEN {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
