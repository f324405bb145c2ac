//! DNS Message Builder
//!
//! Constructs DNS messages in wire format using `hickory-proto`: upstream
//! queries on the forwarding side and responses on the server side.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use zonegate_domain::{DnsQuery, DomainError};

/// Builds DNS messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for `query` and return its id with the bytes.
    ///
    /// Creates a standard recursive query with:
    /// - Random ID for request/response matching
    /// - RD (Recursion Desired) flag set
    /// - Single question section, name spelled as the client sent it
    pub fn build_query_with_id(query: &DnsQuery) -> Result<(u16, Vec<u8>), DomainError> {
        let mut question = Query::new();
        question.set_name(RecordTypeMapper::wire_name(&query.wire_name)?);
        question.set_query_type(RecordTypeMapper::to_hickory(&query.record_type));
        question.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(question);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    /// Build a response to `request` carrying `answers`.
    pub fn build_response(
        request: &Message,
        response_code: ResponseCode,
        answers: Vec<Record>,
        authoritative: bool,
    ) -> Message {
        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        response.set_authoritative(authoritative);
        response.set_response_code(response_code);
        if let Some(question) = request.queries().first() {
            response.add_query(question.clone());
        }
        response.add_answers(answers);
        response
    }

    /// Header-only error response for a request id.
    pub fn build_error(id: u16, op_code: OpCode, response_code: ResponseCode) -> Message {
        let mut response = Message::new(id, MessageType::Response, op_code);
        response.set_recursion_available(true);
        response.set_response_code(response_code);
        response
    }

    /// Serialize a Message to wire format bytes
    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::UpstreamError(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
