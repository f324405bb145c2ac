use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, ResponseCode as HickoryResponseCode};
use tracing::debug;
use zonegate_domain::{Answer, AnswerSet, DomainError, ResponseCode};

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    pub answers: Vec<Answer>,

    /// Answer records dropped because their type is not implemented.
    pub skipped: usize,
}

impl DnsResponse {
    pub fn into_answer_set(self) -> AnswerSet {
        AnswerSet::with_response_code(self.answers, self.rcode).with_truncated(self.truncated)
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::UpstreamError(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = Self::map_rcode(message.response_code());
        let truncated = message.truncated();

        let mut answers = Vec::with_capacity(message.answers().len());
        let mut skipped = 0;
        for record in message.answers() {
            match RecordTypeMapper::from_record(record) {
                Some(answer) => answers.push(answer),
                None => skipped += 1,
            }
        }

        debug!(
            id = message.id(),
            rcode = %rcode,
            answers = answers.len(),
            skipped,
            truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode,
            truncated,
            answers,
            skipped,
        })
    }

    pub fn map_rcode(rcode: HickoryResponseCode) -> ResponseCode {
        match rcode {
            HickoryResponseCode::NoError => ResponseCode::NoError,
            HickoryResponseCode::FormErr => ResponseCode::FormErr,
            HickoryResponseCode::ServFail => ResponseCode::ServFail,
            HickoryResponseCode::NXDomain => ResponseCode::NxDomain,
            HickoryResponseCode::NotImp => ResponseCode::NotImp,
            HickoryResponseCode::Refused => ResponseCode::Refused,
            other => ResponseCode::Other(u16::from(other)),
        }
    }

    pub fn to_hickory_rcode(rcode: ResponseCode) -> HickoryResponseCode {
        match rcode {
            ResponseCode::NoError => HickoryResponseCode::NoError,
            ResponseCode::FormErr => HickoryResponseCode::FormErr,
            ResponseCode::ServFail => HickoryResponseCode::ServFail,
            ResponseCode::NxDomain => HickoryResponseCode::NXDomain,
            ResponseCode::NotImp => HickoryResponseCode::NotImp,
            ResponseCode::Refused => HickoryResponseCode::Refused,
            ResponseCode::Other(code) => code.into(),
        }
    }
}
