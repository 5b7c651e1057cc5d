use crate::domain_name::DomainSuffix;
use serde::{Deserialize, Serialize};

/// DNS resolution configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upstream nameservers, tried in order until one answers
    #[serde(default = "default_nameservers")]
    pub nameservers: Vec<String>,

    /// Domain suffix served by this resolver (SOA owner)
    #[serde(default = "default_domain")]
    pub domain: DomainSuffix,

    /// Optional label placed in front of the domain (`<environment>.<domain>`)
    #[serde(default)]
    pub environment: Option<String>,

    /// Default TTL, used for the SOA record and its minimum field
    #[serde(default)]
    pub ttl: u32,

    /// Per-nameserver exchange timeout in milliseconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

impl DnsConfig {
    /// Served domain with the environment prefix applied.
    pub fn effective_domain(&self) -> DomainSuffix {
        match self.environment.as_deref() {
            Some(env) if !env.is_empty() => self.domain.with_environment(env),
            _ => self.domain.clone(),
        }
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            nameservers: default_nameservers(),
            domain: default_domain(),
            environment: None,
            ttl: 0,
            query_timeout: default_query_timeout(),
        }
    }
}

fn default_nameservers() -> Vec<String> {
    vec!["8.8.4.4:53".to_string(), "8.8.8.8:53".to_string()]
}

fn default_domain() -> DomainSuffix {
    DomainSuffix::new("local")
}

fn default_query_timeout() -> u64 {
    2000
}
