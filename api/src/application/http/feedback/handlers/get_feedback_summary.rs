use axum::{
    Extension,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use vitaplan_core::domain::feedback::{
    ports::FeedbackService, services::DEFAULT_SUMMARY_DAYS, value_objects::FeedbackSummary,
};

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    user_middleware::UserContext,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetFeedbackSummaryQuery {
    /// Window ending today. Defaults to 7, at most 90.
    pub days: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct GetFeedbackSummaryResponse {
    pub data: FeedbackSummary,
}

#[utoipa::path(
    get,
    path = "/feedback/summary",
    tag = "feedback",
    summary = "Feedback summary",
    description = "Plan and adherence totals over the last N days.",
    params(
        ("x-user-id" = String, Header, description = "Caller id"),
        GetFeedbackSummaryQuery
    ),
    responses(
        (status = 200, body = GetFeedbackSummaryResponse),
        (status = 400, description = "Window out of range")
    )
)]
pub async fn get_feedback_summary(
    Query(query): Query<GetFeedbackSummaryQuery>,
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetFeedbackSummaryResponse>, ApiError> {
    let summary = state
        .service
        .feedback_summary(&user.user_id, query.days.unwrap_or(DEFAULT_SUMMARY_DAYS))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetFeedbackSummaryResponse { data: summary }))
}
