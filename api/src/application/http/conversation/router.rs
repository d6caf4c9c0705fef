use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    get_conversations::{__path_get_conversations, get_conversations},
    log_message::{__path_log_message, log_message},
};
use crate::application::{
    http::server::app_state::AppState, user_middleware::user_middleware,
};

#[derive(OpenApi)]
#[openapi(paths(get_conversations, log_message))]
pub struct ConversationApiDoc;

pub fn conversation_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/conversations", state.args.server.root_path),
            get(get_conversations).post(log_message),
        )
        .route_layer(middleware::from_fn(user_middleware))
}
