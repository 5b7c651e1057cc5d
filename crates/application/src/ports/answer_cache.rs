/// Snapshot of the upstream answer cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub shards: usize,
}

/// Administrative handle on the cache of upstream answers.
pub trait AnswerCacheControl: Send + Sync {
    fn stats(&self) -> CacheStats;

    /// Drops every cached answer set.
    fn purge(&self);
}
