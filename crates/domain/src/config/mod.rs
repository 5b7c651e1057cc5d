//! Configuration module for G53
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `server`: DNS and HTTP listen addresses
//! - `dns`: Upstream nameservers, served domain and TTLs
//! - `cache`: Capacities of the private store and the public answer cache
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod dns;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
