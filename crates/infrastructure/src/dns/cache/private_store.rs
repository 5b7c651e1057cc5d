use super::{lru_capacity, EvictCallback};
use chrono::Utc;
use g53_application::ports::ServiceListProvider;
use g53_domain::{DomainError, ServiceQuery, ServiceRecord, ServiceRecordType};
use lru::LruCache;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// (alias, record type, value): the identity of one stored record
type RecordKey = (String, ServiceRecordType, String);

/// Values registered under each record type, in insertion order
type Buckets = FxHashMap<ServiceRecordType, Vec<String>>;

fn key_of(record: &ServiceRecord) -> RecordKey {
    (record.alias.clone(), record.record_type, record.value.clone())
}

struct StoreState {
    records: LruCache<RecordKey, ServiceRecord, FxBuildHasher>,
    aliases: FxHashMap<String, Buckets>,
}

impl StoreState {
    fn bucket(&self, alias: &str, record_type: ServiceRecordType) -> Option<&Vec<String>> {
        self.aliases.get(alias)?.get(&record_type)
    }

    fn peek(
        &self,
        alias: &str,
        record_type: ServiceRecordType,
        value: &str,
    ) -> Option<&ServiceRecord> {
        self.records
            .peek(&(alias.to_string(), record_type, value.to_string()))
    }

    fn collect(&self, alias: &str, record_type: ServiceRecordType) -> Vec<ServiceRecord> {
        self.bucket(alias, record_type)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| self.peek(alias, record_type, v).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drops a value from its bucket, deleting emptied buckets and aliases.
    fn forget(&mut self, key: &RecordKey) {
        let (alias, record_type, value) = key;
        let Some(buckets) = self.aliases.get_mut(alias) else {
            return;
        };
        if let Some(values) = buckets.get_mut(record_type) {
            values.retain(|v| v != value);
            if values.is_empty() {
                buckets.remove(record_type);
            }
        }
        if buckets.is_empty() {
            self.aliases.remove(alias);
        }
    }

    fn take(&mut self, key: &RecordKey) -> Option<ServiceRecord> {
        let record = self.records.pop(key)?;
        self.forget(key);
        Some(record)
    }

    /// Removes every record under the key that satisfies `pred`.
    fn detach(
        &mut self,
        alias: &str,
        record_type: ServiceRecordType,
        pred: impl Fn(&ServiceRecord) -> bool,
    ) -> Vec<ServiceRecord> {
        let doomed: Vec<RecordKey> = self
            .collect(alias, record_type)
            .iter()
            .filter(|r| pred(r))
            .map(key_of)
            .collect();

        doomed.iter().filter_map(|key| self.take(key)).collect()
    }

    /// Returns whether the global capacity forced an eviction, plus every
    /// record that left the store.
    fn insert(&mut self, record: ServiceRecord) -> (bool, Vec<ServiceRecord>) {
        let key = key_of(&record);
        let mut dropped = Vec::new();
        let mut evicted = false;

        if let Some(existing) = self.records.get_mut(&key) {
            *existing = record.clone();
        } else {
            let overflow = self.records.push(key, record.clone());
            self.aliases
                .entry(record.alias.clone())
                .or_default()
                .entry(record.record_type)
                .or_default()
                .push(record.value.clone());

            if let Some((old_key, old)) = overflow {
                self.forget(&old_key);
                evicted = true;
                dropped.push(old);
            }
        }

        if record.exclusive {
            dropped.extend(self.detach(&record.alias, record.record_type, |r| !r.exclusive));
        }

        (evicted, dropped)
    }

    /// Rewrites the record identified by `original` with the fields of
    /// `modified`. Returns the records that left the store.
    fn update(
        &mut self,
        original: &ServiceRecord,
        modified: &ServiceRecord,
    ) -> Result<Vec<ServiceRecord>, DomainError> {
        let original_key = key_of(original);
        let modified_key = key_of(modified);

        if !self.records.contains(&original_key) {
            return Err(DomainError::NotFound(format!(
                "{} {} {}",
                original.alias, original.record_type, original.value
            )));
        }

        let mut dropped = Vec::new();
        let now = Utc::now();

        if original_key == modified_key {
            if let Some(entry) = self.records.get_mut(&original_key) {
                entry.ttl = modified.ttl;
                entry.exclusive = modified.exclusive;
                entry.inserted_at = Some(now);
            }
        } else if let Some(entry) = self.records.get_mut(&modified_key) {
            // The new value is already registered: fold the original into it
            entry.ttl = modified.ttl;
            entry.exclusive = modified.exclusive;
            entry.inserted_at = Some(now);
            dropped.extend(self.take(&original_key));
        } else if let Some(mut entry) = self.records.pop(&original_key) {
            entry.value = modified.value.clone();
            entry.ttl = modified.ttl;
            entry.exclusive = modified.exclusive;
            entry.inserted_at = Some(now);
            self.records.push(modified_key, entry);

            if let Some(values) = self
                .aliases
                .get_mut(&original.alias)
                .and_then(|b| b.get_mut(&original.record_type))
            {
                for value in values.iter_mut().filter(|v| **v == original.value) {
                    *value = modified.value.clone();
                }
            }
        }

        if modified.exclusive {
            dropped.extend(self.detach(&modified.alias, modified.record_type, |r| !r.exclusive));
        }

        Ok(dropped)
    }
}

/// Bounded store of administrator-registered records.
///
/// Records are indexed by alias then record type; each key holds any number
/// of values. A single LRU spans the whole store, so the globally oldest
/// record is evicted first whatever its key.
pub struct PrivateRecordStore {
    state: RwLock<StoreState>,
    on_evict: Option<EvictCallback<ServiceRecord>>,
}

impl PrivateRecordStore {
    pub fn new(capacity: usize) -> Result<Self, DomainError> {
        Ok(Self {
            state: RwLock::new(StoreState {
                records: LruCache::with_hasher(lru_capacity(capacity)?, FxBuildHasher),
                aliases: FxHashMap::default(),
            }),
            on_evict: None,
        })
    }

    pub fn with_evict_callback(
        capacity: usize,
        on_evict: EvictCallback<ServiceRecord>,
    ) -> Result<Self, DomainError> {
        let mut store = Self::new(capacity)?;
        store.on_evict = Some(on_evict);
        Ok(store)
    }

    /// Adds a record. Returns true if the store had to evict its oldest
    /// record to make room.
    pub fn add(&self, record: ServiceRecord) -> bool {
        if !record.record_type.is_storable() {
            warn!(
                alias = %record.alias,
                record_type = %record.record_type,
                "Service ignored: only A and CNAME records can be registered"
            );
            return false;
        }

        let record = record.stamped(Utc::now());
        debug!(
            alias = %record.alias,
            record_type = %record.record_type,
            value = %record.value,
            exclusive = record.exclusive,
            "Service record added"
        );

        let (evicted, dropped) = self.write().insert(record);
        self.notify(dropped);
        evicted
    }

    /// One record for the key, picked uniformly at random.
    pub fn get(&self, query: &ServiceQuery) -> Result<ServiceRecord, DomainError> {
        let state = self.read();
        let values = state
            .bucket(&query.alias, query.record_type)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| not_found(query))?;

        let pick = &values[fastrand::usize(..values.len())];
        state
            .peek(&query.alias, query.record_type, pick)
            .cloned()
            .ok_or_else(|| not_found(query))
    }

    pub fn list(&self, query: &ServiceQuery) -> Result<Vec<ServiceRecord>, DomainError> {
        let records = self.read().collect(&query.alias, query.record_type);

        if records.is_empty() {
            return Err(not_found(query));
        }
        Ok(records)
    }

    /// Rewrites the record matching `original` in place and promotes it.
    ///
    /// When `modified` carries a value already registered under the key, the
    /// two collapse into that existing record.
    pub fn set(
        &self,
        original: &ServiceRecord,
        modified: &ServiceRecord,
    ) -> Result<(), DomainError> {
        if !original.same_key(modified) {
            return Err(DomainError::InvalidArgument(
                "Changed service's alias and record type must be equal".to_string(),
            ));
        }

        let dropped = self.write().update(original, modified)?;

        debug!(
            alias = %original.alias,
            from = %original.value,
            to = %modified.value,
            "Service record updated"
        );
        self.notify(dropped);
        Ok(())
    }

    pub fn remove(&self, record: &ServiceRecord) -> Result<(), DomainError> {
        let removed = self
            .write()
            .take(&key_of(record))
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "{} {} {}",
                    record.alias, record.record_type, record.value
                ))
            })?;

        debug!(
            alias = %record.alias,
            record_type = %record.record_type,
            value = %record.value,
            "Service record removed"
        );
        self.notify(vec![removed]);
        Ok(())
    }

    pub fn purge(&self) {
        let drained = {
            let mut state = self.write();
            state.aliases.clear();
            let mut drained = Vec::with_capacity(state.records.len());
            while let Some((_, record)) = state.records.pop_lru() {
                drained.push(record);
            }
            drained
        };
        self.notify(drained);
    }

    pub fn remove_oldest(&self) -> Option<ServiceRecord> {
        let oldest = {
            let mut state = self.write();
            let (key, record) = state.records.pop_lru()?;
            state.forget(&key);
            record
        };
        self.notify(vec![oldest.clone()]);
        Some(oldest)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.read().aliases.contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Alias of every record, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.read()
            .records
            .iter()
            .rev()
            .map(|(_, r)| r.alias.clone())
            .collect()
    }

    /// Every record, oldest first.
    pub fn records(&self) -> Vec<ServiceRecord> {
        self.read()
            .records
            .iter()
            .rev()
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Runs the eviction callback. Must be called with no lock held.
    fn notify(&self, dropped: Vec<ServiceRecord>) {
        if let Some(on_evict) = &self.on_evict {
            for record in &dropped {
                on_evict(record);
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(query: &ServiceQuery) -> DomainError {
    DomainError::NotFound(format!("{} {}", query.alias, query.record_type))
}

impl ServiceListProvider for PrivateRecordStore {
    fn add_service(&self, record: ServiceRecord) {
        self.add(record);
    }

    fn remove_service(&self, record: &ServiceRecord) -> Result<(), DomainError> {
        self.remove(record)
    }

    fn get_service(&self, query: &ServiceQuery) -> Result<Vec<ServiceRecord>, DomainError> {
        self.list(query)
    }

    fn get_all_services(&self) -> Vec<ServiceRecord> {
        self.records()
    }

    fn update_service(
        &self,
        original: &ServiceRecord,
        modified: &ServiceRecord,
    ) -> Result<(), DomainError> {
        self.set(original, modified)
    }
}
