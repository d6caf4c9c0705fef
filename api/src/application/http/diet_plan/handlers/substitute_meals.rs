use axum::{
    Extension,
    extract::{Path, State},
};
use chrono::NaiveDate;
use vitaplan_core::domain::diet_plan::{
    ports::DietPlanService, value_objects::SubstitutionInput,
};

use super::generate_plan::DietPlanResponse;
use crate::application::{
    http::{
        diet_plan::validators::SubstitutionValidator,
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

#[utoipa::path(
    post,
    path = "/{date}/substitutions",
    tag = "diet-plan",
    summary = "Substitute meals",
    description = "Regenerates an existing plan without meals mentioning the unavailable items.",
    params(
        ("x-user-id" = String, Header, description = "Caller id"),
        ("date" = NaiveDate, Path, description = "Plan date, YYYY-MM-DD"),
    ),
    request_body = SubstitutionValidator,
    responses(
        (status = 200, body = DietPlanResponse),
        (status = 404, description = "No plan for that date")
    )
)]
pub async fn substitute_meals(
    Path(date): Path<NaiveDate>,
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    ValidateJson(payload): ValidateJson<SubstitutionValidator>,
) -> Result<Response<DietPlanResponse>, ApiError> {
    let plan = state
        .service
        .substitute_meals(
            &user.user_id,
            date,
            SubstitutionInput {
                unavailable_items: payload.unavailable_items,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DietPlanResponse { data: plan }))
}
