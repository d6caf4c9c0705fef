use axum::{Extension, extract::State};
use vitaplan_core::domain::user_profile::ports::UserProfileService;

use super::get_profile::GetProfileResponse;
use crate::application::{
    http::{
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
        user_profile::validators::UpsertProfileValidator,
    },
    user_middleware::UserContext,
};

#[utoipa::path(
    put,
    path = "/me",
    tag = "user",
    summary = "Create or replace profile",
    description = "Stores the caller's profile. BMI is derived from height and weight.",
    params(("x-user-id" = String, Header, description = "Caller id")),
    request_body = UpsertProfileValidator,
    responses(
        (status = 200, body = GetProfileResponse),
        (status = 400, description = "Invalid profile")
    )
)]
pub async fn upsert_profile(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    ValidateJson(payload): ValidateJson<UpsertProfileValidator>,
) -> Result<Response<GetProfileResponse>, ApiError> {
    let profile = state
        .service
        .upsert_profile(&user.user_id, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetProfileResponse {
        bmi_category: profile.bmi_category(),
        data: profile,
    }))
}
