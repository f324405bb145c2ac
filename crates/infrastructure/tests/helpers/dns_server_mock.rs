#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use zonegate_infrastructure::dns::forwarding::MessageBuilder;

/// How the mock upstream replies to each query.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// A for A queries, AAAA for AAAA queries, empty NOERROR otherwise.
    Answer { v4: Ipv4Addr, v6: Ipv6Addr, ttl: u32 },
    NxDomain,
    /// Never replies.
    Silent,
    /// Replies with an id that does not match the query.
    WrongId,
    /// Sends a bogus reply from another socket before the real one.
    SpoofThenAnswer { v4: Ipv4Addr, ttl: u32 },
    /// Sends a reply with a stray id before the real one.
    WrongIdThenAnswer { v4: Ipv4Addr, ttl: u32 },
    /// Answers A queries with the TC bit set.
    Truncated { v4: Ipv4Addr, ttl: u32 },
}

impl MockBehavior {
    pub fn answer(v4: Ipv4Addr, ttl: u32) -> Self {
        MockBehavior::Answer {
            v4,
            v6: Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1),
            ttl,
        }
    }
}

pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    questions: Arc<Mutex<Vec<(String, RecordType)>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;

        let queries = Arc::new(AtomicUsize::new(0));
        let questions = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_queries = Arc::clone(&queries);
        let task_questions = Arc::clone(&questions);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let Ok(query) = Message::from_vec(&buf[..len]) else { continue };

                        task_queries.fetch_add(1, Ordering::SeqCst);
                        if let Some(question) = query.queries().first() {
                            task_questions
                                .lock()
                                .unwrap()
                                .push((question.name().to_ascii(), question.query_type()));
                        }

                        if matches!(behavior, MockBehavior::SpoofThenAnswer { .. }) {
                            let spoofer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
                            let bogus = Self::build_response(&query, &MockBehavior::NxDomain).unwrap();
                            let _ = spoofer.send_to(&bogus, peer).await;
                        }

                        if matches!(behavior, MockBehavior::WrongIdThenAnswer { .. }) {
                            let stray = Self::build_response(&query, &MockBehavior::WrongId).unwrap();
                            let _ = socket.send_to(&stray, peer).await;
                        }

                        if let Some(response) = Self::build_response(&query, &behavior) {
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            questions,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn questions(&self) -> Vec<(String, RecordType)> {
        self.questions.lock().unwrap().clone()
    }

    fn build_response(query: &Message, behavior: &MockBehavior) -> Option<Vec<u8>> {
        let question = query.queries().first()?.clone();

        let id = match behavior {
            MockBehavior::Silent => return None,
            MockBehavior::WrongId => query.id().wrapping_add(1),
            _ => query.id(),
        };

        let mut response = Message::new(id, MessageType::Response, OpCode::Query);
        response.set_recursion_desired(true);
        response.set_recursion_available(true);

        if matches!(behavior, MockBehavior::Truncated { .. }) {
            response.set_truncated(true);
        }

        let query_type = question.query_type();
        let rdata = match behavior {
            MockBehavior::NxDomain => {
                response.set_response_code(ResponseCode::NXDomain);
                None
            }
            MockBehavior::Answer { v4, v6, .. } => match query_type {
                RecordType::A => Some(RData::A(A(*v4))),
                RecordType::AAAA => Some(RData::AAAA(AAAA(*v6))),
                _ => None,
            },
            MockBehavior::SpoofThenAnswer { v4, .. }
            | MockBehavior::WrongIdThenAnswer { v4, .. }
            | MockBehavior::Truncated { v4, .. } => {
                (query_type == RecordType::A).then(|| RData::A(A(*v4)))
            }
            MockBehavior::WrongId => {
                (query_type == RecordType::A).then(|| RData::A(A(WRONG_ID_ADDR)))
            }
            MockBehavior::Silent => None,
        };

        let ttl = match behavior {
            MockBehavior::Answer { ttl, .. }
            | MockBehavior::SpoofThenAnswer { ttl, .. }
            | MockBehavior::WrongIdThenAnswer { ttl, .. }
            | MockBehavior::Truncated { ttl, .. } => *ttl,
            _ => 60,
        };

        if let Some(rdata) = rdata {
            response.add_answer(Record::from_rdata(question.name().clone(), ttl, rdata));
        }
        response.add_query(question);

        MessageBuilder::serialize_message(&response).ok()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

const WRONG_ID_ADDR: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
