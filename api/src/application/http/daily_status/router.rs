use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::get_daily_status::{__path_get_daily_status, get_daily_status};
use crate::application::{
    http::server::app_state::AppState, user_middleware::user_middleware,
};

#[derive(OpenApi)]
#[openapi(paths(get_daily_status))]
pub struct DailyStatusApiDoc;

pub fn daily_status_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/daily-status", state.args.server.root_path),
            get(get_daily_status),
        )
        .route_layer(middleware::from_fn(user_middleware))
}
