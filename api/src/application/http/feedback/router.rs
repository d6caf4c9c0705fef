use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    get_feedback::{__path_get_feedback, get_feedback},
    get_feedback_summary::{__path_get_feedback_summary, get_feedback_summary},
    submit_feedback::{__path_submit_feedback, submit_feedback},
};
use crate::application::{
    http::server::app_state::AppState, user_middleware::user_middleware,
};

/// Feedback paths are absolute: they live under both `/diet-plans` and `/feedback`.
#[derive(OpenApi)]
#[openapi(paths(submit_feedback, get_feedback, get_feedback_summary))]
pub struct FeedbackApiDoc;

pub fn feedback_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    Router::new()
        .route(
            &format!("{root_path}/diet-plans/{{date}}/feedback"),
            get(get_feedback).post(submit_feedback),
        )
        .route(
            &format!("{root_path}/feedback/summary"),
            get(get_feedback_summary),
        )
        .route_layer(middleware::from_fn(user_middleware))
}
