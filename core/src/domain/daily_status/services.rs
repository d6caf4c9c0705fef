use chrono::NaiveDate;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service, today},
    conversation::{ports::ConversationRepository, services::last_interaction_date},
    daily_status::{
        ports::DailyStatusService,
        value_objects::{DailyOverview, DailyStatus},
    },
    diet_plan::ports::DietPlanRepository,
    feedback::ports::FeedbackRepository,
    health::ports::HealthCheckRepository,
    user_profile::ports::UserProfileRepository,
};

pub fn greeting(status: &DailyStatus) -> String {
    match status.days_since_last_interaction {
        None => "Hello! Welcome to VitaPlan. Share your health details and I will prepare your first diet plan.".to_string(),
        Some(days) if days <= 0 => match (status.has_diet_plan, status.has_feedback) {
            (true, false) => {
                "Welcome back! I see you have today's diet plan. How is it going so far?".to_string()
            }
            (true, true) => "Great to see you again! I have your feedback from today. Would you like me to prepare tomorrow's plan?".to_string(),
            _ => "Welcome back! Let me create today's personalized diet plan for you.".to_string(),
        },
        Some(1) => "Welcome back! I missed you yesterday. Let me check how you're doing and create today's diet plan.".to_string(),
        Some(days) => format!(
            "Welcome back! It's been {days} days since we last connected. Let me create a fresh diet plan for you today."
        ),
    }
}

/// Prompt asking for feedback, only while a plan is waiting for it.
pub fn feedback_prompt(status: &DailyStatus) -> Option<String> {
    if !status.should_collect_feedback {
        return None;
    }

    let prompt = match status.days_since_last_interaction {
        None | Some(..=0) => "How did you follow today's diet plan? Share your feedback so I can improve tomorrow's recommendations.".to_string(),
        Some(1) => "You haven't shared feedback on yesterday's plan yet. How did it go?".to_string(),
        Some(days) => format!(
            "It's been {days} days since we last connected. How have you been following your diet plans?"
        ),
    };
    Some(prompt)
}

impl<U, CV, DP, FB, HC> DailyStatusService for Service<U, CV, DP, FB, HC>
where
    U: UserProfileRepository,
    CV: ConversationRepository,
    DP: DietPlanRepository,
    FB: FeedbackRepository,
    HC: HealthCheckRepository,
{
    async fn daily_overview(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<DailyOverview, CoreError> {
        let has_diet_plan = self.diet_plan_repository.get(user_id, date).await?.is_some();
        let has_feedback = self.feedback_repository.get(user_id, date).await?.is_some();
        let last_interaction = last_interaction_date(&self.conversation_repository, user_id).await?;

        let status = DailyStatus::new(date, today(), has_diet_plan, has_feedback, last_interaction);

        Ok(DailyOverview {
            greeting: greeting(&status),
            feedback_prompt: feedback_prompt(&status),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;
    use crate::{
        application::testing::{local_service, seed_profile},
        domain::diet_plan::{ports::DietPlanService, value_objects::GeneratePlanInput},
    };

    fn day(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap() + Days::new(offset)
    }

    #[test]
    fn new_user_gets_welcome_and_new_day() {
        let status = DailyStatus::new(day(0), day(0), false, false, None);
        assert!(status.is_new_day);
        assert!(status.should_create_plan);
        assert_eq!(status.days_since_last_interaction, None);
        assert!(greeting(&status).starts_with("Hello! Welcome to VitaPlan"));
        assert_eq!(feedback_prompt(&status), None);
    }

    #[test]
    fn returning_after_a_gap_mentions_days() {
        let status = DailyStatus::new(day(4), day(4), false, false, Some(day(0)));
        assert!(status.is_new_day);
        assert_eq!(status.days_since_last_interaction, Some(4));
        assert!(greeting(&status).contains("4 days"));
    }

    #[test]
    fn plan_without_feedback_prompts_for_it() {
        let status = DailyStatus::new(day(2), day(2), true, false, Some(day(2)));
        assert!(!status.is_new_day);
        assert!(status.should_collect_feedback);
        assert!(greeting(&status).contains("today's diet plan"));
        assert!(feedback_prompt(&status).is_some());

        let done = DailyStatus::new(day(2), day(2), true, true, Some(day(2)));
        assert_eq!(feedback_prompt(&done), None);
    }

    #[test]
    fn plan_ahead_of_today_does_not_ask_for_feedback() {
        let status = DailyStatus::new(day(3), day(2), true, false, Some(day(2)));
        assert!(!status.should_collect_feedback);
        assert_eq!(feedback_prompt(&status), None);
    }

    #[tokio::test]
    async fn overview_for_a_future_plan_skips_the_feedback_prompt() {
        let service = local_service().await;
        seed_profile(&service, "u-1", &[], &[]).await;
        let tomorrow = today() + Days::new(1);
        service
            .generate_plan(
                "u-1",
                GeneratePlanInput {
                    date: Some(tomorrow),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let overview = service.daily_overview("u-1", tomorrow).await.unwrap();
        assert!(overview.status.has_diet_plan);
        assert!(!overview.status.should_collect_feedback);
        assert_eq!(overview.feedback_prompt, None);
    }

    #[tokio::test]
    async fn overview_reflects_stored_plan() {
        let service = local_service().await;
        seed_profile(&service, "u-1", &[], &[]).await;

        let before = service.daily_overview("u-1", today()).await.unwrap();
        assert!(!before.status.has_diet_plan);
        assert!(before.status.is_new_day);

        service.todays_plan("u-1").await.unwrap();

        let after = service.daily_overview("u-1", today()).await.unwrap();
        assert!(after.status.has_diet_plan);
        assert_eq!(after.status.last_interaction, Some(today()));
        assert_eq!(after.status.days_since_last_interaction, Some(0));
        assert!(after.feedback_prompt.is_some());
    }
}
