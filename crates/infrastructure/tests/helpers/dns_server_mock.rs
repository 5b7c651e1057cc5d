#![allow(dead_code)]
use g53_infrastructure::dns::forwarding::MessageBuilder;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock nameserver reacts to a query
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Answers every question with an A record
    Answer { ip: Ipv4Addr, ttl: u32 },
    /// Replies with the given rcode and no records
    Rcode(ResponseCode),
    /// Replies with a message ID that does not match the query
    WrongId,
    /// Never replies
    Silent,
}

/// Nameserver bound to an ephemeral loopback port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        if let Some(response) = build_response(&buf[..len], behavior) {
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Datagrams received so far
    pub fn queries_received(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn build_response(query: &[u8], behavior: MockBehavior) -> Option<Vec<u8>> {
    if matches!(behavior, MockBehavior::Silent) {
        return None;
    }

    let request = Message::from_vec(query).ok()?;
    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true);
    response.add_queries(request.queries().iter().cloned());

    match behavior {
        MockBehavior::Answer { ip, ttl } => {
            for question in request.queries() {
                response.add_answer(Record::from_rdata(
                    question.name().clone(),
                    ttl,
                    RData::A(A(ip)),
                ));
            }
        }
        MockBehavior::Rcode(rcode) => {
            response.set_response_code(rcode);
        }
        MockBehavior::WrongId => {
            response.set_id(request.id().wrapping_add(1));
        }
        MockBehavior::Silent => {}
    }

    MessageBuilder::encode(&response).ok()
}
