use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::get_recommendation::{__path_get_recommendation, get_recommendation};
use crate::application::{
    http::server::app_state::AppState, user_middleware::user_middleware,
};

#[derive(OpenApi)]
#[openapi(paths(get_recommendation))]
pub struct RecommendationApiDoc;

pub fn recommendation_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/recommendations", state.args.server.root_path),
            get(get_recommendation),
        )
        .route_layer(middleware::from_fn(user_middleware))
}
