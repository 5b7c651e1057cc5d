//! # G53
//!
//! Caching DNS resolver answering for locally registered services and
//! forwarding everything else to upstream nameservers.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use g53_api::AppState;
use g53_domain::CliOverrides;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

use crate::bootstrap::config::log_config;
use crate::di::DnsServices;

#[derive(Parser, Debug)]
#[command(name = "g53")]
#[command(version)]
#[command(about = "Caching DNS resolver for locally registered services")]
struct Cli {
    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Upstream nameservers (host:port), comma separated or repeated
    #[arg(long = "nameserver", value_delimiter = ',')]
    nameservers: Vec<String>,

    /// DNS listen address
    #[arg(short = 'd', long = "dns")]
    dns_addr: Option<String>,

    /// HTTP API listen address
    #[arg(short = 't', long = "http")]
    http_addr: Option<String>,

    /// Domain served by this resolver
    #[arg(long)]
    domain: Option<String>,

    /// Environment label placed in front of the domain
    #[arg(long)]
    environment: Option<String>,

    /// Default TTL for generated SOA records
    #[arg(long)]
    ttl: Option<u32>,

    /// Debug logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Warnings and errors only
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            nameservers: (!self.nameservers.is_empty()).then(|| self.nameservers.clone()),
            dns_addr: self.dns_addr.clone(),
            http_addr: self.http_addr.clone(),
            domain: self.domain.clone(),
            environment: self.environment.clone(),
            ttl: self.ttl,
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);
    log_config(cli.config.as_deref(), &config);

    let services = DnsServices::new(&config)?;
    let dns_addr: SocketAddr = config.server.dns_addr.parse()?;
    let http_addr: SocketAddr = config.server.http_addr.parse()?;

    let state = AppState::new(
        services.store.clone(),
        services.cache.clone(),
        Arc::clone(&services.default_ttl),
    );

    let dns = tokio::spawn(server::start_dns_server(
        dns_addr,
        Arc::clone(&services.engine),
    ));
    let web = tokio::spawn(server::start_web_server(http_addr, state));

    tokio::select! {
        result = dns => {
            error!("DNS server exited");
            result??;
        }
        result = web => {
            error!("HTTP server exited");
            result??;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nameserver_flag_accepts_csv_and_repeats() {
        let cli = Cli::try_parse_from([
            "g53",
            "--nameserver",
            "1.1.1.1:53,9.9.9.9:53",
            "--nameserver",
            "8.8.8.8:53",
        ])
        .unwrap();

        assert_eq!(
            cli.overrides().nameservers.unwrap(),
            vec!["1.1.1.1:53", "9.9.9.9:53", "8.8.8.8:53"]
        );
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "g53", "-d", "127.0.0.1:5353", "-t", "127.0.0.1:8080", "-v", "--ttl", "30",
        ])
        .unwrap();
        let overrides = cli.overrides();

        assert_eq!(overrides.dns_addr.as_deref(), Some("127.0.0.1:5353"));
        assert_eq!(overrides.http_addr.as_deref(), Some("127.0.0.1:8080"));
        assert_eq!(overrides.ttl, Some(30));
        assert!(overrides.verbose);
        assert!(overrides.nameservers.is_none());
    }
}
