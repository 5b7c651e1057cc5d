use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record types that can be registered as local services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceRecordType {
    A,
    AAAA,
    CNAME,
    SOA,
}

impl ServiceRecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceRecordType::A => "A",
            ServiceRecordType::AAAA => "AAAA",
            ServiceRecordType::CNAME => "CNAME",
            ServiceRecordType::SOA => "SOA",
        }
    }

    /// Only A and CNAME records are accepted by the private store.
    pub fn is_storable(&self) -> bool {
        matches!(self, ServiceRecordType::A | ServiceRecordType::CNAME)
    }

    /// Address records answer for A/AAAA queries and conflict with CNAME.
    pub fn is_address(&self) -> bool {
        matches!(self, ServiceRecordType::A | ServiceRecordType::AAAA)
    }
}

impl fmt::Display for ServiceRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceRecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(ServiceRecordType::A),
            "AAAA" => Ok(ServiceRecordType::AAAA),
            "CNAME" => Ok(ServiceRecordType::CNAME),
            "SOA" => Ok(ServiceRecordType::SOA),
            _ => Err(format!("Invalid record type: {}", s)),
        }
    }
}

/// Administrator-registered record.
///
/// Identity is `(alias, record_type)`; several records may share it, and
/// uniqueness is on `(alias, record_type, value)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Name the record answers for (e.g. "web.local.")
    pub alias: String,

    pub record_type: ServiceRecordType,

    /// IPv4 address for A records, target host for CNAME records
    pub value: String,

    /// Time-to-live in seconds
    pub ttl: u32,

    /// Inserting an exclusive record drops the non-exclusive siblings
    /// under the same (alias, record_type)
    #[serde(default)]
    pub exclusive: bool,

    /// Set by the store on insert and on every in-place update
    #[serde(default, skip_deserializing)]
    pub inserted_at: Option<DateTime<Utc>>,
}

impl ServiceRecord {
    pub fn new(
        alias: impl Into<String>,
        record_type: ServiceRecordType,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            alias: alias.into(),
            record_type,
            value: value.into(),
            ttl,
            exclusive: false,
            inserted_at: None,
        }
    }

    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.inserted_at = Some(at);
        self
    }

    /// Same (alias, record_type) key
    pub fn same_key(&self, other: &ServiceRecord) -> bool {
        self.alias == other.alias && self.record_type == other.record_type
    }

    /// Same (alias, record_type, value) identity
    pub fn same_identity(&self, other: &ServiceRecord) -> bool {
        self.same_key(other) && self.value == other.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_parsing() {
        assert_eq!("a".parse::<ServiceRecordType>(), Ok(ServiceRecordType::A));
        assert_eq!(
            "CNAME".parse::<ServiceRecordType>(),
            Ok(ServiceRecordType::CNAME)
        );
        assert!("MX".parse::<ServiceRecordType>().is_err());
    }

    #[test]
    fn test_storable_types() {
        assert!(ServiceRecordType::A.is_storable());
        assert!(ServiceRecordType::CNAME.is_storable());
        assert!(!ServiceRecordType::AAAA.is_storable());
        assert!(!ServiceRecordType::SOA.is_storable());
    }

    #[test]
    fn test_identity() {
        let a = ServiceRecord::new("foo.test.", ServiceRecordType::A, "10.0.0.1", 600);
        let b = ServiceRecord::new("foo.test.", ServiceRecordType::A, "10.0.0.2", 60);
        let c = ServiceRecord::new("foo.test.", ServiceRecordType::A, "10.0.0.1", 30);

        assert!(a.same_key(&b));
        assert!(!a.same_identity(&b));
        assert!(a.same_identity(&c));
    }

    #[test]
    fn test_deserialize_defaults() {
        let record: ServiceRecord = toml::from_str(
            r#"
            alias = "foo.test."
            record_type = "A"
            value = "10.0.0.1"
            ttl = 600
            "#,
        )
        .unwrap();

        assert_eq!(record.record_type, ServiceRecordType::A);
        assert!(!record.exclusive);
        assert!(record.inserted_at.is_none());
    }
}
