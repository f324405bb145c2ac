#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use std::str::FromStr;
use zonegate_infrastructure::dns::forwarding::MessageBuilder;

pub const EXAMPLE_ZONE: &str = r#"{
    "example.com": { "A": "1.2.3.4", "ttl": 120 },
    "mail.example.com": {
        "MX": [
            { "exchange": "mx1.example.com", "priority": 10 },
            { "exchange": "mx2.example.com", "priority": 20 }
        ],
        "TXT": ["v=spf1 mx -all"]
    },
    "printer.lan": { "A": "192.168.1.50", "AAAA": "fd00::50" }
}"#;

pub struct QueryBuilder;

impl QueryBuilder {
    pub fn query(id: u16, domain: &str, record_type: RecordType) -> Vec<u8> {
        let mut question = Query::new();
        question.set_name(Name::from_str(domain).unwrap());
        question.set_query_type(record_type);
        question.set_query_class(DNSClass::IN);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(question);
        MessageBuilder::serialize_message(&message).unwrap()
    }

    pub fn without_question(id: u16) -> Vec<u8> {
        let message = Message::new(id, MessageType::Query, OpCode::Query);
        MessageBuilder::serialize_message(&message).unwrap()
    }

    pub fn with_op_code(id: u16, op_code: OpCode) -> Vec<u8> {
        let message = Message::new(id, MessageType::Query, op_code);
        MessageBuilder::serialize_message(&message).unwrap()
    }
}

pub fn parse(bytes: &[u8]) -> Message {
    Message::from_vec(bytes).unwrap()
}
