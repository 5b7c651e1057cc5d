//! G53 Domain Layer
pub mod config;
pub mod domain_name;
pub mod errors;
pub mod service_query;
pub mod service_record;
pub mod validators;

pub use config::{CliOverrides, Config, ConfigError};
pub use domain_name::{fqdn, DomainSuffix};
pub use errors::DomainError;
pub use service_query::ServiceQuery;
pub use service_record::{ServiceRecord, ServiceRecordType};
