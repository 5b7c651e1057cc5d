mod get_stats;
mod purge;

pub use get_stats::GetCacheStatsUseCase;
pub use purge::PurgeCacheUseCase;
