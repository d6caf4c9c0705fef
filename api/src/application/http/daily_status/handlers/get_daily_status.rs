use axum::{
    Extension,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use vitaplan_core::domain::{
    common::today,
    daily_status::{ports::DailyStatusService, value_objects::DailyOverview},
};

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    user_middleware::UserContext,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetDailyStatusQuery {
    /// Defaults to today.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct GetDailyStatusResponse {
    pub data: DailyOverview,
}

#[utoipa::path(
    get,
    path = "",
    tag = "daily-status",
    summary = "Daily status",
    description = "What the caller still has to do for the day, with a greeting and a feedback prompt.",
    params(
        ("x-user-id" = String, Header, description = "Caller id"),
        GetDailyStatusQuery
    ),
    responses((status = 200, body = GetDailyStatusResponse))
)]
pub async fn get_daily_status(
    Query(query): Query<GetDailyStatusQuery>,
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetDailyStatusResponse>, ApiError> {
    let overview = state
        .service
        .daily_overview(&user.user_id, query.date.unwrap_or_else(today))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetDailyStatusResponse { data: overview }))
}
