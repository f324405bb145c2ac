use crate::dns::forwarding::{MessageBuilder, RecordTypeMapper, ResponseParser};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::Record;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};
use zonegate_application::use_cases::{AnswerSource, QueryDispatcher, QueryOutcome};
use zonegate_domain::{AnswerSet, DnsRequest};

/// Largest response sent without EDNS(0).
const MAX_PLAIN_UDP_RESPONSE: usize = 512;

/// Turns wire-format requests into dispatcher calls and dispatcher
/// outcomes back into wire-format responses.
pub struct DnsServerHandler {
    dispatcher: Arc<QueryDispatcher>,
}

impl DnsServerHandler {
    pub fn new(dispatcher: Arc<QueryDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Returns the bytes to send back, or `None` when nothing must be sent.
    pub async fn handle_raw(&self, bytes: &[u8], client_ip: IpAddr) -> Option<Vec<u8>> {
        let request = match Message::from_vec(bytes) {
            Ok(message) => message,
            Err(e) => {
                debug!(client = %client_ip, error = %e, len = bytes.len(), "Malformed DNS request");
                let id = readable_id(bytes)?;
                return encode(&MessageBuilder::build_error(
                    id,
                    OpCode::Query,
                    ResponseCode::FormErr,
                ));
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %client_ip, id = request.id(), "Ignoring DNS response sent to server");
            return None;
        }

        if request.op_code() != OpCode::Query {
            debug!(client = %client_ip, op_code = ?request.op_code(), "Unsupported opcode");
            return encode(&MessageBuilder::build_error(
                request.id(),
                request.op_code(),
                ResponseCode::NotImp,
            ));
        }

        let Some(question) = request.queries().first() else {
            debug!(client = %client_ip, id = request.id(), "Request without question");
            return encode(&MessageBuilder::build_error(
                request.id(),
                request.op_code(),
                ResponseCode::FormErr,
            ));
        };

        let domain = match RecordTypeMapper::from_name(question.name()) {
            Ok(domain) => domain,
            Err(e) => {
                debug!(client = %client_ip, error = %e, "Unusable question name");
                return encode(&MessageBuilder::build_response(
                    &request,
                    ResponseCode::FormErr,
                    vec![],
                    false,
                ));
            }
        };
        let record_type = RecordTypeMapper::from_hickory(question.query_type());
        let dns_request = DnsRequest::new(domain, record_type, client_ip)
            .with_wire_name(question.name().to_ascii());

        match self.dispatcher.execute(&dns_request).await {
            QueryOutcome::Answered { answers, source } => {
                self.answer_response(&request, &answers, source == AnswerSource::Local)
            }
            QueryOutcome::NotImplemented => encode(&MessageBuilder::build_response(
                &request,
                ResponseCode::NotImp,
                vec![],
                false,
            )),
            QueryOutcome::Dropped(_) => None,
        }
    }

    fn answer_response(
        &self,
        request: &Message,
        answers: &AnswerSet,
        authoritative: bool,
    ) -> Option<Vec<u8>> {
        let mut records: Vec<Record> = Vec::with_capacity(answers.len());
        for answer in answers.records.iter() {
            match RecordTypeMapper::to_record(answer) {
                Ok(record) => records.push(record),
                Err(e) => warn!(name = %answer.name, error = %e, "Dropping unencodable answer"),
            }
        }

        let rcode = ResponseParser::to_hickory_rcode(answers.response_code);
        let mut response = MessageBuilder::build_response(request, rcode, records, authoritative);
        response.set_truncated(answers.truncated);
        let bytes = match MessageBuilder::serialize_message(&response) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Failed to encode response");
                return encode(&MessageBuilder::build_response(
                    request,
                    ResponseCode::ServFail,
                    vec![],
                    false,
                ));
            }
        };

        if bytes.len() <= MAX_PLAIN_UDP_RESPONSE {
            return Some(bytes);
        }

        debug!(size = bytes.len(), "Response exceeds UDP limit, sending truncated");
        let mut truncated = MessageBuilder::build_response(request, rcode, vec![], authoritative);
        truncated.set_truncated(true);
        encode(&truncated)
    }
}

fn readable_id(bytes: &[u8]) -> Option<u16> {
    match bytes {
        [high, low, ..] => Some(u16::from_be_bytes([*high, *low])),
        _ => None,
    }
}

fn encode(message: &Message) -> Option<Vec<u8>> {
    match MessageBuilder::serialize_message(message) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            error!(error = %e, "Failed to encode response");
            None
        }
    }
}
