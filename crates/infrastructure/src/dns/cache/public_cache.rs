use super::answer_set::AnswerSet;
use super::answer_shard::AnswerShard;
use super::EvictCallback;
use g53_application::ports::{AnswerCacheControl, CacheStats};
use g53_domain::DomainError;
use hickory_proto::rr::{Record, RecordType};
use rustc_hash::FxHasher;
use std::hash::Hasher;
use std::time::Instant;
use tracing::info;

pub const SHARD_COUNT: usize = 256;

/// TTL-aware cache of upstream answers, partitioned into 256 shards.
///
/// Each shard owns its own lock and an equal slice of the total capacity
/// (`capacity / 256`, rounded down). Cross-shard views such as [`len`] and
/// [`keys`] visit shards one at a time and are only eventually consistent.
///
/// [`len`]: PublicAnswerCache::len
/// [`keys`]: PublicAnswerCache::keys
pub struct PublicAnswerCache {
    shards: Vec<AnswerShard>,
    capacity: usize,
}

impl PublicAnswerCache {
    pub fn new(capacity: usize) -> Result<Self, DomainError> {
        Self::build(capacity, None)
    }

    pub fn with_evict_callback(
        capacity: usize,
        on_evict: EvictCallback<AnswerSet>,
    ) -> Result<Self, DomainError> {
        Self::build(capacity, Some(on_evict))
    }

    fn build(
        capacity: usize,
        on_evict: Option<EvictCallback<AnswerSet>>,
    ) -> Result<Self, DomainError> {
        let per_shard = capacity / SHARD_COUNT;
        let shards = (0..SHARD_COUNT)
            .map(|_| match &on_evict {
                Some(cb) => AnswerShard::with_evict_callback(per_shard, cb.clone()),
                None => AnswerShard::new(per_shard),
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            capacity,
            shards = SHARD_COUNT,
            per_shard,
            "Public answer cache initialized"
        );

        Ok(Self {
            shards,
            capacity: per_shard * SHARD_COUNT,
        })
    }

    /// Stable shard index for a name.
    #[inline]
    pub fn shard_for(name: &str) -> usize {
        let mut hasher = FxHasher::default();
        hasher.write(name.as_bytes());
        (hasher.finish() & 0xff) as usize
    }

    #[inline]
    fn shard(&self, name: &str) -> &AnswerShard {
        &self.shards[Self::shard_for(name)]
    }

    /// Returns true if the owning shard evicted a set.
    pub fn add(&self, set: AnswerSet) -> bool {
        self.shard(&set.name).add(set)
    }

    pub fn get(&self, name: &str, query_type: RecordType) -> Result<Vec<Record>, DomainError> {
        self.get_at(name, query_type, Instant::now())
    }

    pub fn get_at(
        &self,
        name: &str,
        query_type: RecordType,
        now: Instant,
    ) -> Result<Vec<Record>, DomainError> {
        self.shard(name).get_at(name, query_type, now)
    }

    pub fn remove(&self, name: &str, query_type: RecordType) -> Result<(), DomainError> {
        self.shard(name).remove(name, query_type)
    }

    pub fn purge(&self) {
        for shard in &self.shards {
            shard.purge();
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.shards.iter().flat_map(|s| s.keys()).collect()
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(AnswerShard::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Effective capacity after the per-shard split.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl AnswerCacheControl for PublicAnswerCache {
    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            capacity: self.capacity,
            shards: SHARD_COUNT,
        }
    }

    fn purge(&self) {
        PublicAnswerCache::purge(self);
    }
}
