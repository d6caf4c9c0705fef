use crate::domain::{
    conversation::ports::ConversationRepository,
    diet_plan::ports::DietPlanRepository,
    feedback::ports::FeedbackRepository,
    health::ports::HealthCheckRepository,
    recommendation::engine::RecommendationEngine,
    user_profile::ports::UserProfileRepository,
};

/// Application service wired over one repository per port.
///
/// Every domain service trait is implemented on this type, so a single
/// instance backs the whole HTTP surface.
#[derive(Clone)]
pub struct Service<U, CV, DP, FB, HC>
where
    U: UserProfileRepository,
    CV: ConversationRepository,
    DP: DietPlanRepository,
    FB: FeedbackRepository,
    HC: HealthCheckRepository,
{
    pub(crate) user_profile_repository: U,
    pub(crate) conversation_repository: CV,
    pub(crate) diet_plan_repository: DP,
    pub(crate) feedback_repository: FB,
    pub(crate) health_check_repository: HC,
    pub(crate) engine: RecommendationEngine,
}

impl<U, CV, DP, FB, HC> Service<U, CV, DP, FB, HC>
where
    U: UserProfileRepository,
    CV: ConversationRepository,
    DP: DietPlanRepository,
    FB: FeedbackRepository,
    HC: HealthCheckRepository,
{
    pub fn new(
        user_profile_repository: U,
        conversation_repository: CV,
        diet_plan_repository: DP,
        feedback_repository: FB,
        health_check_repository: HC,
        engine: RecommendationEngine,
    ) -> Self {
        Self {
            user_profile_repository,
            conversation_repository,
            diet_plan_repository,
            feedback_repository,
            health_check_repository,
            engine,
        }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }
}
