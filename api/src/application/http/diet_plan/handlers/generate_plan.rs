use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vitaplan_core::domain::diet_plan::{
    entities::DietPlan, ports::DietPlanService, value_objects::GeneratePlanInput,
};

use crate::application::{
    http::{
        diet_plan::validators::GeneratePlanValidator,
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

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DietPlanResponse {
    pub data: DietPlan,
}

#[utoipa::path(
    post,
    path = "",
    tag = "diet-plan",
    summary = "Generate plan",
    description = "Builds the plan for a date from the caller's profile and yesterday's feedback. \
                   An existing plan is returned unless `regenerate` is set.",
    params(("x-user-id" = String, Header, description = "Caller id")),
    request_body = GeneratePlanValidator,
    responses(
        (status = 201, body = DietPlanResponse),
        (status = 400, description = "Date in the past"),
        (status = 404, description = "No profile yet")
    )
)]
pub async fn generate_plan(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    ValidateJson(payload): ValidateJson<GeneratePlanValidator>,
) -> Result<Response<DietPlanResponse>, ApiError> {
    let plan = state
        .service
        .generate_plan(
            &user.user_id,
            GeneratePlanInput {
                date: payload.date,
                regenerate: payload.regenerate,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(DietPlanResponse { data: plan }))
}
