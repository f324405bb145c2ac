#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use zonegate_application::ports::{AccessGate, RecordStore, ResponseCachePort, UpstreamResolver};
use zonegate_domain::{
    Answer, AnswerSet, DnsQuery, DomainError, DomainName, RecordData, RecordType, ZoneEntry,
};

pub fn name(raw: &str) -> DomainName {
    DomainName::new(raw).unwrap()
}

pub fn a_answers(domain: &str, ip: &str, ttl: u32) -> AnswerSet {
    AnswerSet::new(vec![Answer::new(
        name(domain),
        ttl,
        RecordData::A(ip.parse().unwrap()),
    )])
}

#[derive(Default)]
pub struct MockRecordStore {
    entries: HashMap<DomainName, ZoneEntry>,
    lookups: AtomicUsize,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, domain: &str, entry: ZoneEntry) -> Self {
        self.entries.insert(name(domain), entry);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl RecordStore for MockRecordStore {
    fn lookup(&self, domain: &DomainName) -> Option<&ZoneEntry> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.entries.get(domain)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Default)]
pub struct MockResponseCache {
    entries: Mutex<HashMap<(DomainName, RecordType), (AnswerSet, u32)>>,
    gets: AtomicUsize,
    puts: AtomicUsize,
}

impl MockResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preload(&self, domain: &str, record_type: RecordType, answers: AnswerSet) {
        self.entries
            .lock()
            .unwrap()
            .insert((name(domain), record_type), (answers, 300));
    }

    pub fn stored_ttl(&self, domain: &str, record_type: RecordType) -> Option<u32> {
        self.entries
            .lock()
            .unwrap()
            .get(&(name(domain), record_type))
            .map(|(_, ttl)| *ttl)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

impl ResponseCachePort for MockResponseCache {
    fn get(&self, domain: &DomainName, record_type: RecordType) -> Option<AnswerSet> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .get(&(domain.clone(), record_type))
            .map(|(answers, _)| answers.clone())
    }

    fn put(&self, domain: DomainName, record_type: RecordType, answers: AnswerSet, ttl_secs: u32) {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .insert((domain, record_type), (answers, ttl_secs));
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// Allow-list plus a plain counter without window expiry.
pub struct MockAccessGate {
    allowed: HashSet<IpAddr>,
    limit: u32,
    counts: Mutex<HashMap<IpAddr, u32>>,
    admits: AtomicUsize,
}

impl MockAccessGate {
    pub fn allowing(clients: &[IpAddr]) -> Self {
        Self {
            allowed: clients.iter().copied().collect(),
            limit: u32::MAX,
            counts: Mutex::new(HashMap::new()),
            admits: AtomicUsize::new(0),
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn admits(&self) -> usize {
        self.admits.load(Ordering::SeqCst)
    }
}

impl AccessGate for MockAccessGate {
    fn is_allowed(&self, client: IpAddr) -> bool {
        self.allowed.contains(&client)
    }

    fn admit(&self, client: IpAddr) -> bool {
        self.admits.fetch_add(1, Ordering::SeqCst);
        let mut counts = self.counts.lock().unwrap();
        let count = counts.entry(client).or_insert(0);
        *count += 1;
        *count <= self.limit
    }
}

pub struct MockUpstreamResolver {
    responses: Mutex<HashMap<(DomainName, RecordType), Result<AnswerSet, DomainError>>>,
    delay: Option<Duration>,
    forwarded: Mutex<Vec<DnsQuery>>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            delay: None,
            forwarded: Mutex::new(Vec::new()),
        }
    }

    /// Every forward sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_response(
        &self,
        domain: &str,
        record_type: RecordType,
        response: Result<AnswerSet, DomainError>,
    ) {
        self.responses
            .lock()
            .unwrap()
            .insert((name(domain), record_type), response);
    }

    pub fn calls(&self) -> usize {
        self.forwarded.lock().unwrap().len()
    }

    pub fn forwarded(&self) -> Vec<DnsQuery> {
        self.forwarded.lock().unwrap().clone()
    }
}

impl Default for MockUpstreamResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn forward(
        &self,
        query: &DnsQuery,
        _timeout: Duration,
    ) -> Result<AnswerSet, DomainError> {
        self.forwarded.lock().unwrap().push(query.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .get(&(query.domain.clone(), query.record_type))
            .cloned()
            .unwrap_or_else(|| Err(DomainError::UpstreamError("no mock response".to_string())))
    }
}
