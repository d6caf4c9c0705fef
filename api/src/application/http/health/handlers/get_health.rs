use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vitaplan_core::domain::health::ports::HealthCheckService;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage_response_time_ms: u64,
}

#[utoipa::path(
    get,
    path = "",
    tag = "health",
    summary = "Liveness",
    description = "Answers when the process is up and its storage backend responds.",
    responses(
        (status = 200, body = HealthResponse),
        (status = 503, description = "Storage backend unreachable")
    )
)]
pub async fn get_health(
    State(state): State<AppState>,
) -> Result<Response<HealthResponse>, ApiError> {
    let storage_response_time_ms = state.service.health().await.map_err(|e| {
        tracing::warn!("Health check failed: {}", e);
        ApiError::ServiceUnavailable("storage backend unreachable".to_string())
    })?;

    Ok(Response::OK(HealthResponse {
        status: "up".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage_response_time_ms,
    }))
}
