use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service, today},
    conversation::ports::ConversationRepository,
    diet_plan::ports::DietPlanRepository,
    feedback::{ports::FeedbackRepository, services::next_plan_strategy},
    health::ports::HealthCheckRepository,
    recommendation::{
        ports::RecommendationService,
        value_objects::{ExclusionTerms, RecommendInput, Recommendation, RecommendationRequest},
    },
    user_profile::ports::UserProfileRepository,
};

impl<U, CV, DP, FB, HC> RecommendationService for Service<U, CV, DP, FB, HC>
where
    U: UserProfileRepository,
    CV: ConversationRepository,
    DP: DietPlanRepository,
    FB: FeedbackRepository,
    HC: HealthCheckRepository,
{
    async fn recommend_for_user(
        &self,
        user_id: &str,
        input: RecommendInput,
    ) -> Result<Recommendation, CoreError> {
        let profile = self
            .user_profile_repository
            .get_by_user_id(user_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        let plan_date = input.date.unwrap_or_else(today);
        let strategy = next_plan_strategy(&self.feedback_repository, user_id, plan_date).await?;

        Ok(self.engine.recommend(&RecommendationRequest {
            condition: profile.primary_condition(),
            slot: input.slot,
            exclusions: ExclusionTerms::for_profile(
                &profile.allergies,
                &profile.dietary_preferences,
            ),
            strategy,
            plan_date,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::testing::{local_service, seed_profile},
        domain::{
            meal_catalog::{Condition, MealSlot},
            recommendation::value_objects::MealSelection,
        },
    };

    #[tokio::test]
    async fn recommends_from_profile_condition_and_allergies() {
        let service = local_service().await;
        seed_profile(&service, "u-1", &["diabetic"], &["nuts"]).await;

        let recommendation = service
            .recommend_for_user(
                "u-1",
                RecommendInput {
                    slot: MealSlot::Breakfast,
                    date: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(recommendation.condition, Condition::Diabetic);
        match recommendation.selection {
            MealSelection::Meals(meals) => {
                assert!(!meals.contains(&"Greek yogurt with nuts".to_string()))
            }
            MealSelection::NoSuitableMeal => panic!("expected meals"),
        }
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let service = local_service().await;
        let result = service
            .recommend_for_user(
                "nobody",
                RecommendInput {
                    slot: MealSlot::Lunch,
                    date: None,
                },
            )
            .await;
        assert_eq!(result, Err(CoreError::NotFound));
    }
}
