use crate::{
    dto::{CacheStatsResponse, PurgeCacheResponse},
    state::AppState,
};
use axum::{extract::State, Json};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_cache_stats")]
pub async fn get_cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.get_cache_stats.execute();
    debug!(
        total_entries = stats.entries,
        capacity = stats.capacity,
        "Cache statistics retrieved"
    );
    Json(stats.into())
}

#[instrument(skip(state), name = "api_purge_cache")]
pub async fn purge_cache(State(state): State<AppState>) -> Json<PurgeCacheResponse> {
    let purged = state.purge_cache.execute();
    Json(PurgeCacheResponse { purged })
}
