use axum::{
    Extension,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use vitaplan_core::domain::{
    meal_catalog::{Condition, MealSlot},
    recommendation::{
        ports::RecommendationService,
        value_objects::{PlanStrategy, RecommendInput, Recommendation},
    },
};

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    user_middleware::UserContext,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetRecommendationQuery {
    /// breakfast, lunch, dinner or snacks
    pub slot: String,
    /// Plan date used for rotation and strategy. Defaults to today.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RecommendationResponse {
    pub condition: Condition,
    pub slot: MealSlot,
    pub strategy: PlanStrategy,
    pub meals: Vec<String>,
    /// Set when nothing survived filtering, even after the general fallback.
    pub no_suitable_meal: bool,
    pub used_general_fallback: bool,
    pub notes: Vec<String>,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            condition: recommendation.condition,
            slot: recommendation.slot,
            strategy: recommendation.strategy,
            meals: recommendation.selection.meals().to_vec(),
            no_suitable_meal: recommendation.selection.is_empty(),
            used_general_fallback: recommendation.used_general_fallback,
            notes: recommendation.notes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetRecommendationResponse {
    pub data: RecommendationResponse,
}

#[utoipa::path(
    get,
    path = "",
    tag = "recommendation",
    summary = "Recommend meals for one slot",
    description = "Runs the engine against the caller's profile without storing a plan.",
    params(
        ("x-user-id" = String, Header, description = "Caller id"),
        GetRecommendationQuery
    ),
    responses(
        (status = 200, body = GetRecommendationResponse),
        (status = 400, description = "Unknown slot"),
        (status = 404, description = "No profile yet")
    )
)]
pub async fn get_recommendation(
    Query(query): Query<GetRecommendationQuery>,
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetRecommendationResponse>, ApiError> {
    let slot: MealSlot = query.slot.parse().map_err(ApiError::BadRequest)?;

    let recommendation = state
        .service
        .recommend_for_user(
            &user.user_id,
            RecommendInput {
                slot,
                date: query.date,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetRecommendationResponse {
        data: recommendation.into(),
    }))
}
