use g53_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Summary line emitted once logging is up.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    let domain = config.dns.effective_domain();
    info!(
        config_file = config_path.unwrap_or("default"),
        dns_addr = %config.server.dns_addr,
        http_addr = %config.server.http_addr,
        domain = %domain.as_str(),
        nameservers = %config.dns.nameservers.join(","),
        ttl = config.dns.ttl,
        "Configuration loaded"
    );
}
