use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    get_health::{__path_get_health, get_health},
    get_readiness::{__path_get_readiness, get_readiness},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health, get_readiness))]
pub struct HealthApiDoc;

pub fn health_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    Router::new()
        .route(&format!("{root_path}/health"), get(get_health))
        .route(&format!("{root_path}/health/ready"), get(get_readiness))
}
