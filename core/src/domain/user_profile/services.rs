use tracing::info;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    conversation::ports::ConversationRepository,
    diet_plan::ports::DietPlanRepository,
    feedback::ports::FeedbackRepository,
    health::ports::HealthCheckRepository,
    user_profile::{
        entities::UserProfile,
        ports::{UserProfileRepository, UserProfileService},
        value_objects::UpsertProfileInput,
    },
};

impl<U, CV, DP, FB, HC> UserProfileService for Service<U, CV, DP, FB, HC>
where
    U: UserProfileRepository,
    CV: ConversationRepository,
    DP: DietPlanRepository,
    FB: FeedbackRepository,
    HC: HealthCheckRepository,
{
    async fn get_profile(&self, user_id: &str) -> Result<UserProfile, CoreError> {
        self.user_profile_repository
            .get_by_user_id(user_id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    async fn upsert_profile(
        &self,
        user_id: &str,
        input: UpsertProfileInput,
    ) -> Result<UserProfile, CoreError> {
        input.validate()?;

        let profile = match self.user_profile_repository.get_by_user_id(user_id).await? {
            Some(mut existing) => {
                existing.replace(input);
                existing
            }
            None => {
                info!(user_id, "creating user profile");
                UserProfile::new(user_id.to_string(), input)
            }
        };

        self.user_profile_repository.upsert(profile).await
    }
}
