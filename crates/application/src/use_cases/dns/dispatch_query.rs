use crate::ports::{AccessGate, RecordStore, ResponseCachePort, UpstreamResolver};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use zonegate_domain::{
    AdmissionDenial, Answer, AnswerSet, DnsRequest, DomainError, DEFAULT_TTL,
};

const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Where an answered query got its records from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Local,
    Cache,
    Upstream,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::Local => "LOCAL",
            AnswerSource::Cache => "CACHE",
            AnswerSource::Upstream => "UPSTREAM",
        }
    }
}

/// Terminal state of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Answered {
        answers: AnswerSet,
        source: AnswerSource,
    },
    /// Requested type is outside the implemented set; answer NOTIMP.
    NotImplemented,
    /// No response is sent.
    Dropped(DomainError),
}

impl QueryOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            QueryOutcome::Answered { source, .. } => source.as_str(),
            QueryOutcome::NotImplemented => "NOTIMP",
            QueryOutcome::Dropped(err) => err.status(),
        }
    }
}

pub struct QueryDispatcher {
    record_store: Arc<dyn RecordStore>,
    cache: Option<Arc<dyn ResponseCachePort>>,
    access_gate: Arc<dyn AccessGate>,
    upstream: Arc<dyn UpstreamResolver>,
    upstream_timeout: Duration,
    default_ttl: u32,
}

impl QueryDispatcher {
    pub fn new(
        record_store: Arc<dyn RecordStore>,
        cache: Option<Arc<dyn ResponseCachePort>>,
        access_gate: Arc<dyn AccessGate>,
        upstream: Arc<dyn UpstreamResolver>,
    ) -> Self {
        Self {
            record_store,
            cache,
            access_gate,
            upstream,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            default_ttl: DEFAULT_TTL,
        }
    }

    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// TTL for local answers whose zone entry has none, and for upstream
    /// answers cached without a usable record TTL.
    pub fn with_default_ttl(mut self, ttl: u32) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub async fn execute(&self, request: &DnsRequest) -> QueryOutcome {
        let start = Instant::now();

        info!(
            domain = %request.domain,
            record_type = %request.record_type,
            client = %request.client_ip,
            received_at = %request.received_at,
            "Query received"
        );

        if let Err(denial) = self.check_admission(request) {
            warn!(
                domain = %request.domain,
                record_type = %request.record_type,
                client = %request.client_ip,
                reason = %denial,
                "Query dropped"
            );
            return QueryOutcome::Dropped(DomainError::AdmissionDenied(denial));
        }
        info!(
            domain = %request.domain,
            record_type = %request.record_type,
            client = %request.client_ip,
            "Query admitted"
        );

        if let Some(answers) = self.lookup_local(request) {
            info!(
                domain = %request.domain,
                record_type = %request.record_type,
                client = %request.client_ip,
                answers = answers.len(),
                elapsed_us = start.elapsed().as_micros() as u64,
                "Answered from local zone"
            );
            return QueryOutcome::Answered {
                answers,
                source: AnswerSource::Local,
            };
        }

        info!(
            domain = %request.domain,
            record_type = %request.record_type,
            client = %request.client_ip,
            "Local zone miss"
        );

        if !request.record_type.is_implemented() {
            info!(
                domain = %request.domain,
                record_type = %request.record_type,
                client = %request.client_ip,
                "Record type not implemented"
            );
            return QueryOutcome::NotImplemented;
        }

        if let Some(cache) = &self.cache {
            if let Some(answers) = cache.get(&request.domain, request.record_type) {
                info!(
                    domain = %request.domain,
                    record_type = %request.record_type,
                    client = %request.client_ip,
                    answers = answers.len(),
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "Answered from cache"
                );
                return QueryOutcome::Answered {
                    answers,
                    source: AnswerSource::Cache,
                };
            }
        }

        if self.cache.is_some() {
            info!(
                domain = %request.domain,
                record_type = %request.record_type,
                client = %request.client_ip,
                "Cache miss"
            );
        }

        self.forward_upstream(request, start).await
    }

    fn check_admission(&self, request: &DnsRequest) -> Result<(), AdmissionDenial> {
        // Clients outside the allow-list never touch the rate counters.
        if !self.access_gate.is_allowed(request.client_ip) {
            return Err(AdmissionDenial::NotAllowed);
        }
        if !self.access_gate.admit(request.client_ip) {
            return Err(AdmissionDenial::RateLimited);
        }
        Ok(())
    }

    fn lookup_local(&self, request: &DnsRequest) -> Option<AnswerSet> {
        let entry = self.record_store.lookup(&request.domain)?;
        let values = entry.records(request.record_type)?;
        let ttl = entry.ttl().unwrap_or(self.default_ttl);

        let answers = values
            .iter()
            .map(|data| Answer::new(request.domain.clone(), ttl, data.clone()))
            .collect();
        Some(AnswerSet::new(answers))
    }

    async fn forward_upstream(&self, request: &DnsRequest, start: Instant) -> QueryOutcome {
        let query = request.query();
        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            upstream = %self.upstream.upstream_label(),
            "Forwarding query upstream"
        );

        let result = tokio::time::timeout(
            self.upstream_timeout,
            self.upstream.forward(&query, self.upstream_timeout),
        )
        .await
        .unwrap_or(Err(DomainError::UpstreamTimeout));

        match result {
            Ok(answers) => {
                if answers.is_cacheable() {
                    if let Some(cache) = &self.cache {
                        let ttl = answers.min_ttl().unwrap_or(self.default_ttl);
                        cache.put(
                            request.domain.clone(),
                            request.record_type,
                            answers.clone(),
                            ttl,
                        );
                        debug!(domain = %request.domain, record_type = %request.record_type, ttl, "Cached upstream answer");
                    }
                }

                info!(
                    domain = %request.domain,
                    record_type = %request.record_type,
                    client = %request.client_ip,
                    answers = answers.len(),
                    rcode = %answers.response_code,
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "Answered from upstream"
                );
                QueryOutcome::Answered {
                    answers,
                    source: AnswerSource::Upstream,
                }
            }
            Err(e) => {
                warn!(
                    domain = %request.domain,
                    record_type = %request.record_type,
                    client = %request.client_ip,
                    error = %e,
                    status = e.status(),
                    "Upstream forward failed, query dropped"
                );
                QueryOutcome::Dropped(e)
            }
        }
    }
}
