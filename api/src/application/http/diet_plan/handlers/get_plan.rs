use axum::{
    Extension,
    extract::{Path, State},
};
use chrono::NaiveDate;
use vitaplan_core::domain::diet_plan::ports::DietPlanService;

use super::generate_plan::DietPlanResponse;
use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    user_middleware::UserContext,
};

#[utoipa::path(
    get,
    path = "/{date}",
    tag = "diet-plan",
    summary = "Plan by date",
    params(
        ("x-user-id" = String, Header, description = "Caller id"),
        ("date" = NaiveDate, Path, description = "Plan date, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, body = DietPlanResponse),
        (status = 404, description = "No plan for that date")
    )
)]
pub async fn get_plan(
    Path(date): Path<NaiveDate>,
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<DietPlanResponse>, ApiError> {
    let plan = state
        .service
        .plan_by_date(&user.user_id, date)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DietPlanResponse { data: plan }))
}
