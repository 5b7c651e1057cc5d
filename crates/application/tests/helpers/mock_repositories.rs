#![allow(dead_code)]

use g53_application::ports::{AnswerCacheControl, CacheStats, ServiceListProvider};
use g53_domain::{DomainError, ServiceQuery, ServiceRecord, ServiceRecordType};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// Mock ServiceListProvider
// ============================================================================

#[derive(Default)]
pub struct MockServiceList {
    records: Mutex<Vec<ServiceRecord>>,
}

impl MockServiceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ServiceRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn snapshot(&self) -> Vec<ServiceRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl ServiceListProvider for MockServiceList {
    fn add_service(&self, record: ServiceRecord) {
        if record.record_type.is_storable() {
            self.records.lock().unwrap().push(record);
        }
    }

    fn remove_service(&self, record: &ServiceRecord) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !r.same_identity(record));
        if records.len() == before {
            return Err(DomainError::NotFound(record.alias.clone()));
        }
        Ok(())
    }

    fn get_service(&self, query: &ServiceQuery) -> Result<Vec<ServiceRecord>, DomainError> {
        let found: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.alias == *query.alias && r.record_type == query.record_type)
            .cloned()
            .collect();
        if found.is_empty() {
            return Err(DomainError::NotFound(query.alias.to_string()));
        }
        Ok(found)
    }

    fn get_all_services(&self) -> Vec<ServiceRecord> {
        self.snapshot()
    }

    fn update_service(
        &self,
        original: &ServiceRecord,
        modified: &ServiceRecord,
    ) -> Result<(), DomainError> {
        if !original.same_key(modified) {
            return Err(DomainError::InvalidArgument("key mismatch".into()));
        }
        let mut records = self.records.lock().unwrap();
        let entry = records
            .iter_mut()
            .find(|r| r.same_identity(original))
            .ok_or_else(|| DomainError::NotFound(original.alias.clone()))?;
        entry.value = modified.value.clone();
        entry.ttl = modified.ttl;
        Ok(())
    }
}

pub fn a_record(alias: &str, ip: &str) -> ServiceRecord {
    ServiceRecord::new(alias, ServiceRecordType::A, ip, 300)
}

// ============================================================================
// Mock AnswerCacheControl
// ============================================================================

pub struct MockAnswerCache {
    entries: AtomicUsize,
}

impl MockAnswerCache {
    pub fn with_entries(entries: usize) -> Self {
        Self {
            entries: AtomicUsize::new(entries),
        }
    }
}

impl AnswerCacheControl for MockAnswerCache {
    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.load(Ordering::Relaxed),
            capacity: 65_536,
            shards: 256,
        }
    }

    fn purge(&self) {
        self.entries.store(0, Ordering::Relaxed);
    }
}
