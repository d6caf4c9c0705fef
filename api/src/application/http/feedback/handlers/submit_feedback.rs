use axum::{
    Extension,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use vitaplan_core::domain::feedback::{
    ports::FeedbackService,
    value_objects::{FeedbackOutcome, SubmitFeedbackInput},
};

use crate::application::{
    http::{
        feedback::validators::SubmitFeedbackValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
    user_middleware::UserContext,
};

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct SubmitFeedbackResponse {
    pub data: FeedbackOutcome,
}

#[utoipa::path(
    post,
    path = "/diet-plans/{date}/feedback",
    tag = "feedback",
    summary = "Submit feedback",
    description = "Scores free-text feedback for a plan. Accepted once per plan; the score \
                   decides whether the next day's plan is simplified or varied.",
    params(
        ("x-user-id" = String, Header, description = "Caller id"),
        ("date" = NaiveDate, Path, description = "Plan date, YYYY-MM-DD"),
    ),
    request_body = SubmitFeedbackValidator,
    responses(
        (status = 201, body = SubmitFeedbackResponse),
        (status = 404, description = "No plan for that date"),
        (status = 409, description = "Feedback already submitted")
    )
)]
pub async fn submit_feedback(
    Path(date): Path<NaiveDate>,
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    ValidateJson(payload): ValidateJson<SubmitFeedbackValidator>,
) -> Result<Response<SubmitFeedbackResponse>, ApiError> {
    let outcome = state
        .service
        .submit_feedback(&user.user_id, date, SubmitFeedbackInput { text: payload.text })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(SubmitFeedbackResponse { data: outcome }))
}
