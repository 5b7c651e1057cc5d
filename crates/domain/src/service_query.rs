use super::ServiceRecordType;
use std::sync::Arc;

/// Lookup key for the private record store (alias + record type).
/// Uses `Arc<str>` so the resolver can hand the same alias to several lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceQuery {
    pub alias: Arc<str>,
    pub record_type: ServiceRecordType,
}

impl ServiceQuery {
    pub fn new(alias: impl Into<Arc<str>>, record_type: ServiceRecordType) -> Self {
        Self {
            alias: alias.into(),
            record_type,
        }
    }
}
