use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    conversation::ports::ConversationRepository,
    diet_plan::ports::DietPlanRepository,
    feedback::ports::FeedbackRepository,
    health::{
        entities::StorageHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    user_profile::ports::UserProfileRepository,
};

impl<U, CV, DP, FB, HC> HealthCheckService for Service<U, CV, DP, FB, HC>
where
    U: UserProfileRepository,
    CV: ConversationRepository,
    DP: DietPlanRepository,
    FB: FeedbackRepository,
    HC: HealthCheckRepository,
{
    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }

    async fn readiness(&self) -> Result<StorageHealthStatus, CoreError> {
        self.health_check_repository.readiness().await
    }
}
