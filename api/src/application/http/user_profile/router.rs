use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    get_profile::{__path_get_profile, get_profile},
    upsert_profile::{__path_upsert_profile, upsert_profile},
};
use crate::application::{
    http::server::app_state::AppState, user_middleware::user_middleware,
};

#[derive(OpenApi)]
#[openapi(paths(get_profile, upsert_profile))]
pub struct UserProfileApiDoc;

pub fn user_profile_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/users/me", state.args.server.root_path),
            get(get_profile).put(upsert_profile),
        )
        .route_layer(middleware::from_fn(user_middleware))
}
