use crate::dns_record::{MxData, RecordData, RecordType, SrvData};
use crate::domain_name::DomainName;
use crate::errors::DomainError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::net::{Ipv4Addr, Ipv6Addr};

/// TTL applied to local answers whose zone entry carries none.
pub const DEFAULT_TTL: u32 = 300;

/// Zone source document: domain name -> per-type record values.
pub type ZoneDocument = BTreeMap<String, ZoneFileEntry>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneFileEntry {
    #[serde(rename = "A", default)]
    pub a: Option<String>,

    #[serde(rename = "AAAA", default)]
    pub aaaa: Option<String>,

    #[serde(rename = "CNAME", default)]
    pub cname: Option<String>,

    #[serde(rename = "PTR", default)]
    pub ptr: Option<String>,

    #[serde(rename = "MX", default)]
    pub mx: Vec<ZoneFileMx>,

    #[serde(rename = "NS", default)]
    pub ns: Vec<String>,

    #[serde(rename = "TXT", default)]
    pub txt: Vec<String>,

    #[serde(rename = "SRV", default)]
    pub srv: Vec<ZoneFileSrv>,

    #[serde(default)]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneFileMx {
    pub exchange: String,
    pub priority: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneFileSrv {
    pub target: String,
    pub port: u16,
    #[serde(default)]
    pub priority: u16,
    #[serde(default)]
    pub weight: u16,
}

/// Records held for one name in the local zone.
///
/// Empty value lists are never stored, so `records` returning `Some`
/// always means at least one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneEntry {
    records: HashMap<RecordType, Vec<RecordData>>,
    ttl: Option<u32>,
}

impl ZoneEntry {
    pub fn new(ttl: Option<u32>) -> Self {
        Self {
            records: HashMap::new(),
            ttl,
        }
    }

    /// Adds a value. Scalar types keep only the latest value.
    pub fn insert(&mut self, data: RecordData) {
        let record_type = data.record_type();
        let values = self.records.entry(record_type).or_default();
        if !record_type.is_list() {
            values.clear();
        }
        values.push(data);
    }

    pub fn with_record(mut self, data: RecordData) -> Self {
        self.insert(data);
        self
    }

    pub fn records(&self, record_type: RecordType) -> Option<&[RecordData]> {
        self.records
            .get(&record_type)
            .filter(|values| !values.is_empty())
            .map(Vec::as_slice)
    }

    pub fn record_types(&self) -> impl Iterator<Item = RecordType> + '_ {
        self.records.keys().copied()
    }

    pub fn ttl(&self) -> Option<u32> {
        self.ttl
    }

    pub fn ttl_or_default(&self) -> u32 {
        self.ttl.unwrap_or(DEFAULT_TTL)
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(Vec::is_empty)
    }
}

impl ZoneFileEntry {
    pub fn into_zone_entry(self, domain: &str) -> Result<ZoneEntry, DomainError> {
        let invalid = |reason: String| DomainError::InvalidZoneEntry {
            domain: domain.to_string(),
            reason,
        };
        let name = |raw: &str| {
            DomainName::new(raw).map_err(|e| invalid(e.to_string()))
        };

        let mut entry = ZoneEntry::new(self.ttl);

        if let Some(a) = self.a {
            let addr: Ipv4Addr = a
                .parse()
                .map_err(|_| invalid(format!("invalid A address {}", a)))?;
            entry.insert(RecordData::A(addr));
        }
        if let Some(aaaa) = self.aaaa {
            let addr: Ipv6Addr = aaaa
                .parse()
                .map_err(|_| invalid(format!("invalid AAAA address {}", aaaa)))?;
            entry.insert(RecordData::AAAA(addr));
        }
        if let Some(cname) = self.cname {
            entry.insert(RecordData::CNAME(name(&cname)?));
        }
        if let Some(ptr) = self.ptr {
            entry.insert(RecordData::PTR(name(&ptr)?));
        }
        for mx in self.mx {
            entry.insert(RecordData::MX(MxData {
                exchange: name(&mx.exchange)?,
                priority: mx.priority,
            }));
        }
        for ns in self.ns {
            entry.insert(RecordData::NS(name(&ns)?));
        }
        for txt in self.txt {
            entry.insert(RecordData::TXT(txt));
        }
        for srv in self.srv {
            entry.insert(RecordData::SRV(SrvData {
                target: name(&srv.target)?,
                port: srv.port,
                priority: srv.priority,
                weight: srv.weight,
            }));
        }

        Ok(entry)
    }
}
