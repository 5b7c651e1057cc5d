use crate::dns::forwarding::MessageBuilder;
use crate::dns::resolver::ResolutionEngine;
use g53_domain::DomainError;
use hickory_proto::op::{Edns, Message};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

/// Largest datagram accepted from clients
const MAX_DATAGRAM_SIZE: usize = 4096;

/// Reply size limit for clients that send no EDNS(0) record (RFC 1035)
const MIN_UDP_PAYLOAD: usize = 512;

/// UDP front end: one spawned task per inbound datagram.
pub struct DnsListener {
    socket: Arc<UdpSocket>,
    engine: Arc<ResolutionEngine>,
}

impl DnsListener {
    pub async fn bind(addr: SocketAddr, engine: Arc<ResolutionEngine>) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        info!(bind_address = %socket.local_addr()?, protocol = "UDP", "DNS server listening");
        Ok(Self {
            socket: Arc::new(socket),
            engine,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub async fn run(self) -> io::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Serves until `shutdown` resolves. Tasks already spawned finish on
    /// their own.
    pub async fn run_until(self, shutdown: impl Future<Output = ()>) -> io::Result<()> {
        tokio::pin!(shutdown);
        // One spare byte tells an oversized datagram apart from a full one
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE + 1];

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("DNS server stopped");
                    return Ok(());
                }
                received = self.socket.recv_from(&mut buf) => {
                    let (len, peer) = match received {
                        Ok(v) => v,
                        Err(e) => {
                            warn!(error = %e, "UDP receive failed");
                            continue;
                        }
                    };

                    if len > MAX_DATAGRAM_SIZE {
                        debug!(peer = %peer, limit = MAX_DATAGRAM_SIZE, "Dropping oversized DNS datagram");
                        continue;
                    }

                    let datagram = buf[..len].to_vec();
                    let socket = Arc::clone(&self.socket);
                    let engine = Arc::clone(&self.engine);
                    tokio::spawn(async move {
                        respond(socket, engine, datagram, peer).await;
                    });
                }
            }
        }
    }
}

async fn respond(
    socket: Arc<UdpSocket>,
    engine: Arc<ResolutionEngine>,
    datagram: Vec<u8>,
    peer: SocketAddr,
) {
    let request = match Message::from_vec(&datagram) {
        Ok(message) => message,
        Err(e) => {
            debug!(peer = %peer, error = %e, "Dropping malformed DNS datagram");
            return;
        }
    };

    let response = engine.handle(&request).await;

    match encode_for_udp(&request, response) {
        Ok(bytes) => {
            if let Err(e) = socket.send_to(&bytes, peer).await {
                warn!(peer = %peer, error = %e, "Failed to send DNS response");
            }
        }
        Err(e) => warn!(peer = %peer, error = %e, "Failed to encode DNS response"),
    }
}

/// Reply size the client can take: its advertised EDNS payload, else 512.
fn payload_limit(request: &Message) -> usize {
    request
        .extensions()
        .as_ref()
        .map(|edns| usize::from(edns.max_payload()).clamp(MIN_UDP_PAYLOAD, MAX_DATAGRAM_SIZE))
        .unwrap_or(MIN_UDP_PAYLOAD)
}

/// Encodes `response` for a UDP client. EDNS is echoed when the request
/// carried it; a reply over the client's limit loses its record sections
/// and gets the TC bit so the client can retry over TCP.
fn encode_for_udp(request: &Message, mut response: Message) -> Result<Vec<u8>, DomainError> {
    if request.extensions().is_some() {
        let mut edns = Edns::new();
        edns.set_max_payload(MAX_DATAGRAM_SIZE as u16);
        response.set_edns(edns);
    }

    let limit = payload_limit(request);
    let bytes = MessageBuilder::encode(&response)?;
    if bytes.len() <= limit {
        return Ok(bytes);
    }

    debug!(
        id = response.id(),
        size = bytes.len(),
        limit,
        "Response truncated"
    );
    response.take_answers();
    response.take_name_servers();
    response.take_additionals();
    response.set_truncated(true);
    MessageBuilder::encode(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::{MessageType, Query};
    use hickory_proto::rr::rdata::A;
    use hickory_proto::rr::{Name, RData, Record, RecordType};
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn request(edns_payload: Option<u16>) -> Message {
        let mut message = Message::new();
        message
            .set_id(7)
            .set_recursion_desired(true)
            .add_query(Query::query(Name::from_str("big.local.").unwrap(), RecordType::A));
        if let Some(payload) = edns_payload {
            let mut edns = Edns::new();
            edns.set_max_payload(payload);
            message.set_edns(edns);
        }
        message
    }

    fn response_with(request: &Message, answers: u8) -> Message {
        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .add_queries(request.queries().to_vec());
        let name = Name::from_str("big.local.").unwrap();
        for i in 1..=answers {
            response.add_answer(Record::from_rdata(
                name.clone(),
                300,
                RData::A(A(Ipv4Addr::new(10, 0, 0, i))),
            ));
        }
        response
    }

    #[test]
    fn test_payload_limit_defaults_to_512() {
        assert_eq!(payload_limit(&request(None)), 512);
        assert_eq!(payload_limit(&request(Some(1232))), 1232);
        assert_eq!(payload_limit(&request(Some(65000))), MAX_DATAGRAM_SIZE);
    }

    #[test]
    fn test_small_reply_is_untouched() {
        let req = request(None);
        let bytes = encode_for_udp(&req, response_with(&req, 2)).unwrap();
        let decoded = Message::from_vec(&bytes).unwrap();

        assert!(!decoded.truncated());
        assert_eq!(decoded.answers().len(), 2);
        assert!(decoded.extensions().is_none());
    }

    #[test]
    fn test_oversized_reply_is_truncated() {
        let req = request(None);
        let bytes = encode_for_udp(&req, response_with(&req, 60)).unwrap();
        let decoded = Message::from_vec(&bytes).unwrap();

        assert!(bytes.len() <= 512);
        assert!(decoded.truncated());
        assert!(decoded.answers().is_empty());
        assert_eq!(decoded.queries().len(), 1);
        assert_eq!(decoded.id(), 7);
    }

    #[test]
    fn test_edns_payload_raises_the_limit() {
        let req = request(Some(4096));
        let bytes = encode_for_udp(&req, response_with(&req, 60)).unwrap();
        let decoded = Message::from_vec(&bytes).unwrap();

        assert!(bytes.len() > 512);
        assert!(!decoded.truncated());
        assert_eq!(decoded.answers().len(), 60);
        assert!(decoded.extensions().is_some());
    }
}
