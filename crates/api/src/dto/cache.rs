use g53_application::ports::CacheStats;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct CacheStatsResponse {
    pub total_entries: usize,
    pub capacity: usize,
    pub shards: usize,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            total_entries: stats.entries,
            capacity: stats.capacity,
            shards: stats.shards,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct PurgeCacheResponse {
    pub purged: usize,
}
