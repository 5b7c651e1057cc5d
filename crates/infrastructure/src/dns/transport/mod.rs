pub mod udp;

use async_trait::async_trait;
use g53_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

pub use udp::UdpTransport;

/// Result of a raw DNS transport operation
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Vec<u8>,
}

/// Trait for sending raw DNS messages to one upstream nameserver
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Sends `message_bytes` and waits at most `timeout` for the reply.
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn server_addr(&self) -> SocketAddr;

    fn protocol_name(&self) -> &'static str;
}
