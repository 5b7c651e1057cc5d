use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, instrument, warn};

use crate::{
    dto::{ServiceRequest, ServiceResponse, UpdateServiceRequest},
    errors::ApiError,
    state::AppState,
};

#[instrument(skip(state), name = "api_list_services")]
pub async fn list_services(State(state): State<AppState>) -> Json<Vec<ServiceResponse>> {
    let services: Vec<ServiceResponse> = state
        .list_services
        .execute()
        .into_iter()
        .map(ServiceResponse::from_record)
        .collect();
    debug!(count = services.len(), "Services retrieved");
    Json(services)
}

#[instrument(skip(state), name = "api_get_services")]
pub async fn get_services(
    State(state): State<AppState>,
    Path((alias, record_type)): Path<(String, String)>,
) -> Result<Json<Vec<ServiceResponse>>, ApiError> {
    let services = state.get_services.execute(&alias, &record_type)?;
    Ok(Json(
        services
            .into_iter()
            .map(ServiceResponse::from_record)
            .collect(),
    ))
}

#[instrument(skip(state), name = "api_add_service")]
pub async fn add_service(
    State(state): State<AppState>,
    Json(request): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), ApiError> {
    let record = request.into_record()?;
    let added = state.add_service.execute(record).map_err(|e| {
        warn!(error = %e, "Rejected service");
        e
    })?;
    Ok((StatusCode::CREATED, Json(ServiceResponse::from_record(added))))
}

#[instrument(skip(state), name = "api_update_service")]
pub async fn update_service(
    State(state): State<AppState>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let original = request.original.into_record()?;
    let modified = request.modified.into_record()?;
    let updated = state.update_service.execute(original, modified)?;
    Ok(Json(ServiceResponse::from_record(updated)))
}

#[instrument(skip(state), name = "api_remove_service")]
pub async fn remove_service(
    State(state): State<AppState>,
    Json(request): Json<ServiceRequest>,
) -> Result<StatusCode, ApiError> {
    let record = request.into_record()?;
    state.remove_service.execute(record)?;
    Ok(StatusCode::NO_CONTENT)
}
