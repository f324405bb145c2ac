use async_trait::async_trait;
use std::time::Duration;
use zonegate_domain::{AnswerSet, DnsQuery, DomainError};

#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Sends exactly one request upstream and waits at most `timeout`
    /// for the reply.
    async fn forward(&self, query: &DnsQuery, timeout: Duration)
        -> Result<AnswerSet, DomainError>;

    /// Human-readable upstream address for logs.
    fn upstream_label(&self) -> String {
        "upstream".to_string()
    }
}
