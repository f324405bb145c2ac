use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use zonegate_application::ports::UpstreamResolver;
use zonegate_domain::{AnswerSet, DnsQuery, DomainError};

/// Forwards questions to a single upstream server, one request per query.
pub struct UdpUpstreamResolver {
    transport: Arc<dyn DnsTransport>,
    label: String,
}

impl UdpUpstreamResolver {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            transport: Arc::new(UdpTransport::new(server_addr)),
            label: server_addr.to_string(),
        }
    }

    pub fn with_transport(transport: Arc<dyn DnsTransport>, label: impl Into<String>) -> Self {
        Self {
            transport,
            label: label.into(),
        }
    }
}

#[async_trait]
impl UpstreamResolver for UdpUpstreamResolver {
    async fn forward(
        &self,
        query: &DnsQuery,
        timeout: Duration,
    ) -> Result<AnswerSet, DomainError> {
        let (id, request_bytes) = MessageBuilder::build_query_with_id(query)?;

        let response = self.transport.send(&request_bytes, timeout).await?;
        let parsed = ResponseParser::parse(&response.bytes)?;

        if parsed.id != id {
            return Err(DomainError::UpstreamError(format!(
                "Response id {} does not match query id {}",
                parsed.id, id
            )));
        }

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            upstream = %self.label,
            protocol = response.protocol_used,
            rcode = %parsed.rcode,
            answers = parsed.answers.len(),
            truncated = parsed.truncated,
            "Upstream response received"
        );

        Ok(parsed.into_answer_set())
    }

    fn upstream_label(&self) -> String {
        self.label.clone()
    }
}
