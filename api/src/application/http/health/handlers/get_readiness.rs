use axum::extract::State;
use vitaplan_core::domain::health::{entities::StorageHealthStatus, ports::HealthCheckService};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness",
    description = "Reports the active storage backend, its mode and whether it is reachable.",
    responses(
        (status = 200, body = StorageHealthStatus),
        (status = 503, description = "Neither the backend nor its fallback is reachable")
    )
)]
pub async fn get_readiness(
    State(state): State<AppState>,
) -> Result<Response<StorageHealthStatus>, ApiError> {
    let status = state.service.readiness().await.map_err(ApiError::from)?;

    if !status.reachable && status.fallback_reachable != Some(true) {
        return Err(ApiError::ServiceUnavailable(format!(
            "{} backend unreachable",
            status.backend
        )));
    }

    Ok(Response::OK(status))
}
