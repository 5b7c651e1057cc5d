use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use g53_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP, one ephemeral socket per exchange.
///
/// The socket is connected to the nameserver, so datagrams from any other
/// source are filtered out by the kernel.
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> DomainError {
        DomainError::TransportIo {
            server: self.server_addr.to_string(),
            reason: format!("{}: {}", action, e),
        }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.io_error("bind", e))?;
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.io_error("connect", e))?;

        let exchange = async {
            let bytes_sent = socket
                .send(message_bytes)
                .await
                .map_err(|e| self.io_error("send", e))?;

            debug!(
                server = %self.server_addr,
                bytes_sent = bytes_sent,
                "UDP query sent"
            );

            let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
            let bytes_received = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| self.io_error("receive", e))?;
            recv_buf.truncate(bytes_received);

            debug!(
                server = %self.server_addr,
                bytes_received = bytes_received,
                "UDP response received"
            );

            Ok::<_, DomainError>(recv_buf)
        };

        let bytes = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| self.timeout_error())??;

        Ok(TransportResponse { bytes })
    }

    fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
