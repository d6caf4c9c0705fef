use axum::{
    Extension,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vitaplan_core::domain::feedback::{entities::Feedback, ports::FeedbackService};

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    user_middleware::UserContext,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetFeedbackResponse {
    pub data: Feedback,
}

#[utoipa::path(
    get,
    path = "/diet-plans/{date}/feedback",
    tag = "feedback",
    summary = "Read feedback",
    params(
        ("x-user-id" = String, Header, description = "Caller id"),
        ("date" = NaiveDate, Path, description = "Plan date, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, body = GetFeedbackResponse),
        (status = 404, description = "No feedback for that plan")
    )
)]
pub async fn get_feedback(
    Path(date): Path<NaiveDate>,
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetFeedbackResponse>, ApiError> {
    let feedback = state
        .service
        .get_feedback(&user.user_id, date)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetFeedbackResponse { data: feedback }))
}
