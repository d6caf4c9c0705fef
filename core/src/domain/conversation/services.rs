use chrono::NaiveDate;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    conversation::{
        entities::ConversationEntry,
        ports::{ConversationRepository, ConversationService},
        value_objects::{LogMessageInput, clamp_history_limit},
    },
    diet_plan::ports::DietPlanRepository,
    feedback::ports::FeedbackRepository,
    health::ports::HealthCheckRepository,
    user_profile::ports::UserProfileRepository,
};

impl<U, CV, DP, FB, HC> ConversationService for Service<U, CV, DP, FB, HC>
where
    U: UserProfileRepository,
    CV: ConversationRepository,
    DP: DietPlanRepository,
    FB: FeedbackRepository,
    HC: HealthCheckRepository,
{
    async fn log_message(
        &self,
        user_id: &str,
        input: LogMessageInput,
    ) -> Result<ConversationEntry, CoreError> {
        if input.message.trim().is_empty() {
            return Err(CoreError::Invalid("message must not be empty".to_string()));
        }
        if input.agent_name.trim().is_empty() {
            return Err(CoreError::Invalid("agent_name must not be empty".to_string()));
        }

        let entry = ConversationEntry::new(
            user_id.to_string(),
            input.agent_name.trim().to_string(),
            input.message,
            input.message_type,
        );
        self.conversation_repository.append(entry).await
    }

    async fn conversation_history(
        &self,
        user_id: &str,
        limit: Option<u64>,
    ) -> Result<Vec<ConversationEntry>, CoreError> {
        self.conversation_repository
            .list_recent(user_id, clamp_history_limit(limit))
            .await
    }

    async fn last_interaction_date(&self, user_id: &str) -> Result<Option<NaiveDate>, CoreError> {
        last_interaction_date(&self.conversation_repository, user_id).await
    }
}

/// Calendar date of the newest conversation entry, if the user has any.
pub async fn last_interaction_date<CV: ConversationRepository>(
    conversation_repository: &CV,
    user_id: &str,
) -> Result<Option<NaiveDate>, CoreError> {
    let latest = conversation_repository.list_recent(user_id, 1).await?;
    Ok(latest.first().map(|entry| entry.timestamp.date_naive()))
}
