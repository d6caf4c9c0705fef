use axum::{Extension, extract::State};
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
    path = "/today",
    tag = "diet-plan",
    summary = "Today's plan",
    description = "Returns today's plan, generating it on first access.",
    params(("x-user-id" = String, Header, description = "Caller id")),
    responses(
        (status = 200, body = DietPlanResponse),
        (status = 404, description = "No profile yet")
    )
)]
pub async fn get_todays_plan(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<DietPlanResponse>, ApiError> {
    let plan = state
        .service
        .todays_plan(&user.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DietPlanResponse { data: plan }))
}
