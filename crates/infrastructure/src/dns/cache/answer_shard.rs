use super::answer_set::AnswerSet;
use super::{lru_capacity, EvictCallback};
use g53_domain::DomainError;
use hickory_proto::rr::{Record, RecordType};
use lru::LruCache;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use tracing::debug;

type SetKey = (String, RecordType);

struct ShardState {
    sets: LruCache<SetKey, AnswerSet, FxBuildHasher>,
    names: FxHashMap<String, FxHashSet<RecordType>>,
}

impl ShardState {
    fn peek(&self, name: &str, query_type: RecordType) -> Option<&AnswerSet> {
        self.sets.peek(&(name.to_string(), query_type))
    }

    fn forget(&mut self, name: &str, query_type: RecordType) {
        let Some(types) = self.names.get_mut(name) else {
            return;
        };
        types.remove(&query_type);
        if types.is_empty() {
            self.names.remove(name);
        }
    }

    fn take(&mut self, name: &str, query_type: RecordType) -> Option<AnswerSet> {
        let set = self.sets.pop(&(name.to_string(), query_type))?;
        self.forget(name, query_type);
        Some(set)
    }
}

/// Address records and CNAME never share a name.
fn conflicts<'a>(existing: impl IntoIterator<Item = &'a RecordType>, incoming: RecordType) -> bool {
    let is_address = |t: RecordType| matches!(t, RecordType::A | RecordType::AAAA);
    existing.into_iter().any(|&t| {
        (is_address(t) && incoming == RecordType::CNAME)
            || (is_address(incoming) && t == RecordType::CNAME)
    })
}

/// One independently locked partition of the public answer cache.
pub struct AnswerShard {
    state: RwLock<ShardState>,
    on_evict: Option<EvictCallback<AnswerSet>>,
}

impl AnswerShard {
    pub fn new(capacity: usize) -> Result<Self, DomainError> {
        Ok(Self {
            state: RwLock::new(ShardState {
                sets: LruCache::with_hasher(lru_capacity(capacity)?, FxBuildHasher),
                names: FxHashMap::default(),
            }),
            on_evict: None,
        })
    }

    pub fn with_evict_callback(
        capacity: usize,
        on_evict: EvictCallback<AnswerSet>,
    ) -> Result<Self, DomainError> {
        let mut shard = Self::new(capacity)?;
        shard.on_evict = Some(on_evict);
        Ok(shard)
    }

    /// Caches `set`, replacing any set under the same key. Returns true if
    /// the shard evicted its least recent set to make room.
    pub fn add(&self, set: AnswerSet) -> bool {
        let overflow = {
            let mut state = self.write();

            if let Some(types) = state.names.get(&set.name) {
                let others = types.iter().filter(|t| **t != set.query_type);
                if conflicts(others, set.query_type) {
                    debug!(
                        domain = %set.name,
                        record_type = %set.query_type,
                        "Skipping cache insert: conflicting record class"
                    );
                    return false;
                }
            }

            let key = (set.name.clone(), set.query_type);
            state
                .names
                .entry(set.name.clone())
                .or_default()
                .insert(set.query_type);

            // push hands back either the replaced value or the LRU victim
            match state.sets.push(key.clone(), set) {
                Some((old_key, old)) if old_key != key => {
                    state.forget(&old_key.0, old_key.1);
                    Some(old)
                }
                _ => None,
            }
        };

        match overflow {
            Some(old) => {
                debug!(domain = %old.name, record_type = %old.query_type, "Answer set evicted");
                self.notify(std::slice::from_ref(&old));
                true
            }
            None => false,
        }
    }

    /// TTL-adjusted copies of the cached records as of `now`.
    ///
    /// An expired set is dropped and reported as `Expired`; the next call
    /// then sees `NotFound`.
    pub fn get_at(
        &self,
        name: &str,
        query_type: RecordType,
        now: Instant,
    ) -> Result<Vec<Record>, DomainError> {
        let stale = {
            let state = self.read();
            let set = state
                .peek(name, query_type)
                .ok_or_else(|| not_found(name, query_type))?;

            match set.aged(now) {
                Some(records) => return Ok(records),
                None => set.inserted_at,
            }
        };

        {
            let mut state = self.write();
            let still_stale = state
                .peek(name, query_type)
                .is_some_and(|set| set.inserted_at == stale);
            if still_stale {
                state.take(name, query_type);
            }
        }

        debug!(domain = %name, record_type = %query_type, "Cached answer expired");
        Err(DomainError::Expired(format!("{} {}", name, query_type)))
    }

    pub fn remove(&self, name: &str, query_type: RecordType) -> Result<(), DomainError> {
        let removed = self
            .write()
            .take(name, query_type)
            .ok_or_else(|| not_found(name, query_type))?;
        self.notify(std::slice::from_ref(&removed));
        Ok(())
    }

    pub fn purge(&self) {
        let drained = {
            let mut state = self.write();
            state.names.clear();
            let mut drained = Vec::with_capacity(state.sets.len());
            while let Some((_, set)) = state.sets.pop_lru() {
                drained.push(set);
            }
            drained
        };
        self.notify(&drained);
    }

    /// Names of the cached sets, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.read()
            .sets
            .iter()
            .rev()
            .map(|(_, set)| set.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.read().sets.cap().get()
    }

    fn notify(&self, dropped: &[AnswerSet]) {
        if let Some(on_evict) = &self.on_evict {
            for set in dropped {
                on_evict(set);
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ShardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ShardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(name: &str, query_type: RecordType) -> DomainError {
    DomainError::NotFound(format!("{} {}", name, query_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::rr::rdata::{A, CNAME};
    use hickory_proto::rr::{Name, RData};
    use std::net::Ipv4Addr;
    use std::str::FromStr;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn a_set(name: &str, ttl: u32) -> AnswerSet {
        let record = Record::from_rdata(
            Name::from_str(name).unwrap(),
            ttl,
            RData::A(A(Ipv4Addr::new(10, 0, 0, 1))),
        );
        AnswerSet::new(name, RecordType::A, vec![record])
    }

    fn cname_set(name: &str, target: &str) -> AnswerSet {
        let record = Record::from_rdata(
            Name::from_str(name).unwrap(),
            300,
            RData::CNAME(CNAME(Name::from_str(target).unwrap())),
        );
        AnswerSet::new(name, RecordType::CNAME, vec![record])
    }

    #[test]
    fn test_capacity_three_keeps_three_newest() {
        let shard = AnswerShard::new(3).unwrap();
        shard.add(a_set("one.test.", 600));
        shard.add(a_set("two.test.", 600));
        shard.add(a_set("three.test.", 600));
        let evicted = shard.add(a_set("four.test.", 600));

        assert!(evicted);
        assert_eq!(shard.len(), 3);
        assert!(!shard.keys().contains(&"one.test.".to_string()));
        assert_eq!(shard.keys(), vec!["two.test.", "three.test.", "four.test."]);
    }

    #[test]
    fn test_get_reports_remaining_ttl() {
        let shard = AnswerShard::new(8).unwrap();
        let set = a_set("foo.test.", 600);
        let t0 = set.inserted_at;
        shard.add(set);

        let fresh = shard.get_at("foo.test.", RecordType::A, t0).unwrap();
        let later = shard
            .get_at("foo.test.", RecordType::A, t0 + Duration::from_secs(100))
            .unwrap();

        assert_eq!(fresh[0].ttl(), 600);
        assert_eq!(later[0].ttl(), 500);
    }

    #[test]
    fn test_expired_then_not_found() {
        let shard = AnswerShard::new(8).unwrap();
        let set = a_set("foo.test.", 600);
        let t0 = set.inserted_at;
        shard.add(set);

        let late = t0 + Duration::from_secs(601);
        assert!(matches!(
            shard.get_at("foo.test.", RecordType::A, late),
            Err(DomainError::Expired(_))
        ));
        assert!(matches!(
            shard.get_at("foo.test.", RecordType::A, late),
            Err(DomainError::NotFound(_))
        ));
        assert!(shard.is_empty());
    }

    #[test]
    fn test_cname_rejected_over_address() {
        let shard = AnswerShard::new(8).unwrap();
        shard.add(a_set("foo.test.", 600));

        assert!(!shard.add(cname_set("foo.test.", "bar.test.")));
        assert_eq!(shard.len(), 1);
        assert!(matches!(
            shard.get_at("foo.test.", RecordType::CNAME, Instant::now()),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_address_rejected_over_cname() {
        let shard = AnswerShard::new(8).unwrap();
        shard.add(cname_set("foo.test.", "bar.test."));
        shard.add(a_set("foo.test.", 600));

        assert_eq!(shard.len(), 1);
        assert!(shard
            .get_at("foo.test.", RecordType::A, Instant::now())
            .is_err());
    }

    #[test]
    fn test_empty_bucket_accepts_any_class() {
        let shard = AnswerShard::new(8).unwrap();
        shard.add(a_set("foo.test.", 600));
        shard.remove("foo.test.", RecordType::A).unwrap();
        shard.add(cname_set("foo.test.", "bar.test."));

        assert!(shard
            .get_at("foo.test.", RecordType::CNAME, Instant::now())
            .is_ok());
    }

    #[test]
    fn test_same_key_is_replaced() {
        let shard = AnswerShard::new(8).unwrap();
        shard.add(a_set("foo.test.", 600));
        shard.add(a_set("foo.test.", 60));

        assert_eq!(shard.len(), 1);
        let records = shard
            .get_at("foo.test.", RecordType::A, Instant::now())
            .unwrap();
        assert!(records[0].ttl() <= 60);
    }

    #[test]
    fn test_replace_at_capacity_is_not_an_eviction() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let shard = AnswerShard::with_evict_callback(
            2,
            Arc::new(move |set: &AnswerSet| {
                sink.lock().unwrap().push(set.name.clone())
            }),
        )
        .unwrap();
        shard.add(a_set("one.test.", 600));
        shard.add(a_set("two.test.", 600));

        assert!(!shard.add(a_set("one.test.", 60)));
        assert_eq!(shard.keys(), vec!["two.test.", "one.test."]);
        assert!(seen.lock().unwrap().is_empty());

        assert!(shard.add(a_set("three.test.", 600)));
        assert_eq!(*seen.lock().unwrap(), vec!["two.test."]);
        assert_eq!(shard.capacity(), 2);
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let shard = AnswerShard::new(8).unwrap();
        assert!(matches!(
            shard.remove("foo.test.", RecordType::A),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_purge_notifies_each_set() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let shard = AnswerShard::with_evict_callback(
            8,
            Arc::new(move |set: &AnswerSet| {
                sink.lock().unwrap().push(set.name.clone())
            }),
        )
        .unwrap();
        shard.add(a_set("one.test.", 600));
        shard.add(a_set("two.test.", 600));

        shard.purge();

        assert!(shard.is_empty());
        assert_eq!(*seen.lock().unwrap(), vec!["one.test.", "two.test."]);
    }
}
