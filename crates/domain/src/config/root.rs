use super::{CacheConfig, ConfigError, DnsConfig, LoggingConfig, ServerConfig};
use crate::domain_name::DomainSuffix;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Number of shards in the public answer cache; every shard needs room
/// for at least one answer set.
const PUBLIC_CACHE_SHARDS: usize = 256;

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values coming from command-line flags; `None` keeps the file/default value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub nameservers: Option<Vec<String>>,
    pub dns_addr: Option<String>,
    pub http_addr: Option<String>,
    pub domain: Option<String>,
    pub environment: Option<String>,
    pub ttl: Option<u32>,
    pub verbose: bool,
    pub quiet: bool,
}

impl Config {
    /// Load configuration from an optional TOML file, then apply CLI overrides
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(nameservers) = overrides.nameservers {
            self.dns.nameservers = split_nameservers(&nameservers);
        }
        if let Some(addr) = overrides.dns_addr {
            self.server.dns_addr = addr;
        }
        if let Some(addr) = overrides.http_addr {
            self.server.http_addr = addr;
        }
        if let Some(domain) = overrides.domain {
            self.dns.domain = DomainSuffix::new(&domain);
        }
        if let Some(environment) = overrides.environment {
            self.dns.environment = Some(environment);
        }
        if let Some(ttl) = overrides.ttl {
            self.dns.ttl = ttl;
        }
        if overrides.verbose || overrides.quiet {
            self.logging = LoggingConfig::from_verbosity(overrides.verbose, overrides.quiet);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.nameservers.is_empty() {
            return Err(ConfigError::Validation(
                "At least one nameserver must be configured".into(),
            ));
        }
        for ns in &self.dns.nameservers {
            ns.parse::<SocketAddr>().map_err(|e| {
                ConfigError::Validation(format!("Invalid nameserver '{}': {}", ns, e))
            })?;
        }
        self.server.dns_addr.parse::<SocketAddr>().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid DNS address '{}': {}",
                self.server.dns_addr, e
            ))
        })?;
        self.server.http_addr.parse::<SocketAddr>().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid HTTP address '{}': {}",
                self.server.http_addr, e
            ))
        })?;
        if self.dns.effective_domain().as_str().is_empty() {
            return Err(ConfigError::Validation("Domain cannot be empty".into()));
        }
        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than zero".into(),
            ));
        }
        if self.cache.private_capacity == 0 {
            return Err(ConfigError::Validation(
                "Private store capacity must be positive".into(),
            ));
        }
        if self.cache.public_capacity < PUBLIC_CACHE_SHARDS {
            return Err(ConfigError::Validation(format!(
                "Public cache capacity must be at least {}",
                PUBLIC_CACHE_SHARDS
            )));
        }
        Ok(())
    }
}

/// Accepts both repeated flags and comma separated lists.
fn split_nameservers(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(|ns| ns.trim().to_string())
        .filter(|ns| !ns.is_empty())
        .collect()
}
