use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates all API routes with state
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/services",
            get(handlers::list_services)
                .put(handlers::add_service)
                .patch(handlers::update_service)
                .delete(handlers::remove_service),
        )
        .route(
            "/services/{alias}/{record_type}",
            get(handlers::get_services),
        )
        .route("/set/ttl", put(handlers::set_default_ttl))
        .route("/cache/stats", get(handlers::get_cache_stats))
        .route("/cache", delete(handlers::purge_cache))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
