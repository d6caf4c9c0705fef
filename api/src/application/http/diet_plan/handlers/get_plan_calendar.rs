use axum::{
    Extension,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use vitaplan_core::domain::diet_plan::{ports::DietPlanService, value_objects::PlanCalendar};

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    user_middleware::UserContext,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetPlanCalendarQuery {
    pub start: NaiveDate,
    /// Inclusive. At most 62 days after `start`.
    pub end: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct GetPlanCalendarResponse {
    pub data: PlanCalendar,
}

#[utoipa::path(
    get,
    path = "/calendar",
    tag = "diet-plan",
    summary = "Plan calendar",
    description = "Dates in the inclusive range that have a plan.",
    params(
        ("x-user-id" = String, Header, description = "Caller id"),
        GetPlanCalendarQuery
    ),
    responses(
        (status = 200, body = GetPlanCalendarResponse),
        (status = 400, description = "Range reversed or too long")
    )
)]
pub async fn get_plan_calendar(
    Query(query): Query<GetPlanCalendarQuery>,
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetPlanCalendarResponse>, ApiError> {
    let calendar = state
        .service
        .plan_calendar(&user.user_id, query.start, query.end)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetPlanCalendarResponse { data: calendar }))
}
