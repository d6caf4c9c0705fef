use axum::{
    Extension,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use vitaplan_core::domain::diet_plan::{entities::DietPlan, ports::DietPlanService};

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    user_middleware::UserContext,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetPlanHistoryQuery {
    /// Defaults to 30.
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetPlanHistoryResponse {
    pub data: Vec<DietPlan>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "diet-plan",
    summary = "Plan history",
    description = "The caller's plans, newest date first.",
    params(
        ("x-user-id" = String, Header, description = "Caller id"),
        GetPlanHistoryQuery
    ),
    responses((status = 200, body = GetPlanHistoryResponse))
)]
pub async fn get_plan_history(
    Query(query): Query<GetPlanHistoryQuery>,
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetPlanHistoryResponse>, ApiError> {
    let plans = state
        .service
        .plan_history(&user.user_id, query.limit)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetPlanHistoryResponse { data: plans }))
}
