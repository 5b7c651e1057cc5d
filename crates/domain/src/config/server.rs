use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address the UDP DNS listener binds to
    #[serde(default = "default_dns_addr")]
    pub dns_addr: String,

    /// Address the administrative HTTP API binds to
    #[serde(default = "default_http_addr")]
    pub http_addr: String,
}

fn default_dns_addr() -> String {
    "0.0.0.0:53".to_string()
}

fn default_http_addr() -> String {
    "0.0.0.0:80".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_addr: default_dns_addr(),
            http_addr: default_http_addr(),
        }
    }
}
