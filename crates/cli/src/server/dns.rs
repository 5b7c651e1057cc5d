use g53_infrastructure::dns::{DnsListener, ResolutionEngine};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub async fn start_dns_server(
    bind_addr: SocketAddr,
    engine: Arc<ResolutionEngine>,
) -> anyhow::Result<()> {
    info!(bind_address = %bind_addr, "Starting DNS server");

    let listener = DnsListener::bind(bind_addr, engine).await?;

    info!("DNS server ready to accept queries");

    listener.run().await?;

    Ok(())
}
