use utoipa::OpenApi;

use crate::application::http::{
    conversation::router::ConversationApiDoc, daily_status::router::DailyStatusApiDoc,
    diet_plan::router::DietPlanApiDoc, feedback::router::FeedbackApiDoc,
    health::router::HealthApiDoc, recommendation::router::RecommendationApiDoc,
    user_profile::router::UserProfileApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "VitaPlan API",
        description = "Condition-aware meal plans, feedback scoring and daily check-ins."
    ),
    nest(
        (path = "/health", api = HealthApiDoc),
        (path = "/users", api = UserProfileApiDoc),
        (path = "/conversations", api = ConversationApiDoc),
        (path = "/recommendations", api = RecommendationApiDoc),
        (path = "/diet-plans", api = DietPlanApiDoc),
        (path = "/daily-status", api = DailyStatusApiDoc),
    )
)]
pub struct ApiDoc;

/// Full document, including the feedback paths that span two prefixes.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.merge(FeedbackApiDoc::openapi());
    openapi
}
