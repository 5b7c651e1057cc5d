use g53_domain::{DomainError, ServiceRecord, ServiceRecordType};
use serde::{Deserialize, Serialize};

/// Record body accepted by the service endpoints.
///
/// Every field defaults so that a missing property surfaces as a validation
/// error rather than a body rejection.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ServiceRequest {
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub record_type: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub exclusive: bool,
}

impl ServiceRequest {
    pub fn into_record(self) -> Result<ServiceRecord, DomainError> {
        let record_type = self
            .record_type
            .parse::<ServiceRecordType>()
            .map_err(DomainError::InvalidRecordType)?;

        let mut record = ServiceRecord::new(self.alias, record_type, self.value, self.ttl);
        record.exclusive = self.exclusive;
        Ok(record)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct UpdateServiceRequest {
    pub original: ServiceRequest,
    pub modified: ServiceRequest,
}

#[derive(Serialize, Debug, Clone)]
pub struct ServiceResponse {
    pub alias: String,
    pub record_type: String,
    pub value: String,
    pub ttl: u32,
    pub exclusive: bool,
    pub inserted_at: Option<String>,
}

impl ServiceResponse {
    pub fn from_record(record: ServiceRecord) -> Self {
        Self {
            alias: record.alias,
            record_type: record.record_type.to_string(),
            value: record.value,
            ttl: record.ttl,
            exclusive: record.exclusive,
            inserted_at: record.inserted_at.map(|at| at.to_rfc3339()),
        }
    }
}
