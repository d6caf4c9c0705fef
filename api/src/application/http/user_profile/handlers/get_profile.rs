use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vitaplan_core::domain::user_profile::{
    entities::UserProfile, ports::UserProfileService, value_objects::BmiCategory,
};

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    user_middleware::UserContext,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetProfileResponse {
    pub data: UserProfile,
    pub bmi_category: Option<BmiCategory>,
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "user",
    summary = "Get profile",
    description = "Returns the caller's health profile.",
    params(("x-user-id" = String, Header, description = "Caller id")),
    responses(
        (status = 200, body = GetProfileResponse),
        (status = 404, description = "No profile yet")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetProfileResponse>, ApiError> {
    let profile = state
        .service
        .get_profile(&user.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetProfileResponse {
        bmi_category: profile.bmi_category(),
        data: profile,
    }))
}
