use crate::{dto::TtlResponse, state::AppState};
use axum::{extract::State, Json};
use tracing::instrument;

#[instrument(skip(state), name = "api_set_default_ttl")]
pub async fn set_default_ttl(
    State(state): State<AppState>,
    Json(ttl): Json<u32>,
) -> Json<TtlResponse> {
    let previous = state.set_default_ttl.execute(ttl);
    Json(TtlResponse { previous, ttl })
}
