use chrono::NaiveDate;
use tracing::info;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service, today},
    conversation::{
        entities::{ConversationEntry, PLANNER_AGENT},
        ports::ConversationRepository,
    },
    diet_plan::{
        entities::{DietPlan, DietPlanConfig, MealPlan},
        ports::{DietPlanRepository, DietPlanService},
        value_objects::{
            GeneratePlanInput, PlanCalendar, SubstitutionInput, clamp_history_limit,
            validate_calendar_range,
        },
    },
    feedback::{ports::FeedbackRepository, services::next_plan_strategy},
    health::ports::HealthCheckRepository,
    meal_catalog::MealSlot,
    recommendation::{
        engine::RecommendationEngine,
        value_objects::{ExclusionTerms, MealSelection, PlanStrategy, RecommendationRequest},
    },
    user_profile::{
        entities::{UserProfile, normalize_terms},
        ports::UserProfileRepository,
    },
};

/// Runs the engine once per slot and assembles the resulting plan.
pub fn compose_plan(
    engine: &RecommendationEngine,
    profile: &UserProfile,
    plan_date: NaiveDate,
    strategy: PlanStrategy,
    unavailable_items: Vec<String>,
) -> DietPlan {
    let condition = profile.primary_condition();
    let mut exclusions =
        ExclusionTerms::for_profile(&profile.allergies, &profile.dietary_preferences);
    exclusions.extend(&unavailable_items);

    let mut meal_plan = MealPlan {
        notes: engine.notes(condition),
        ..Default::default()
    };
    let mut unfilled_slots = Vec::new();

    for slot in MealSlot::ALL {
        let recommendation = engine.recommend(&RecommendationRequest {
            condition,
            slot,
            exclusions: exclusions.clone(),
            strategy,
            plan_date,
        });
        match recommendation.selection {
            MealSelection::Meals(meals) => meal_plan.set_slot(slot, meals),
            MealSelection::NoSuitableMeal => unfilled_slots.push(slot),
        }
    }

    DietPlan::new(DietPlanConfig {
        user_id: profile.user_id.clone(),
        plan_date,
        meal_plan,
        condition,
        strategy,
        unfilled_slots,
        unavailable_items,
    })
}

impl<U, CV, DP, FB, HC> Service<U, CV, DP, FB, HC>
where
    U: UserProfileRepository,
    CV: ConversationRepository,
    DP: DietPlanRepository,
    FB: FeedbackRepository,
    HC: HealthCheckRepository,
{
    async fn require_profile(&self, user_id: &str) -> Result<UserProfile, CoreError> {
        self.user_profile_repository
            .get_by_user_id(user_id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    async fn store_plan(
        &self,
        plan: DietPlan,
        previous: Option<&DietPlan>,
    ) -> Result<DietPlan, CoreError> {
        let plan = match previous {
            Some(previous) => plan.succeed(previous),
            None => plan,
        };
        let plan = self.diet_plan_repository.save(plan).await?;

        info!(
            user_id = %plan.user_id,
            plan_date = %plan.plan_date,
            condition = %plan.condition,
            strategy = %plan.strategy,
            unfilled = plan.unfilled_slots.len(),
            "diet plan stored"
        );

        let message = format!(
            "Prepared a {} plan for {} ({} focus)",
            plan.strategy, plan.plan_date, plan.condition
        );
        self.conversation_repository
            .append(ConversationEntry::agent_response(
                &plan.user_id,
                PLANNER_AGENT,
                message,
            ))
            .await?;

        Ok(plan)
    }
}

impl<U, CV, DP, FB, HC> DietPlanService for Service<U, CV, DP, FB, HC>
where
    U: UserProfileRepository,
    CV: ConversationRepository,
    DP: DietPlanRepository,
    FB: FeedbackRepository,
    HC: HealthCheckRepository,
{
    async fn generate_plan(
        &self,
        user_id: &str,
        input: GeneratePlanInput,
    ) -> Result<DietPlan, CoreError> {
        let plan_date = input.date.unwrap_or_else(today);
        if plan_date < today() {
            return Err(CoreError::Invalid(
                "plans can only be generated for today or later".to_string(),
            ));
        }

        let profile = self.require_profile(user_id).await?;
        let existing = self.diet_plan_repository.get(user_id, plan_date).await?;
        if let Some(existing) = &existing {
            if !input.regenerate {
                return Ok(existing.clone());
            }
        }

        let strategy = next_plan_strategy(&self.feedback_repository, user_id, plan_date).await?;
        let plan = compose_plan(&self.engine, &profile, plan_date, strategy, Vec::new());

        self.store_plan(plan, existing.as_ref()).await
    }

    async fn todays_plan(&self, user_id: &str) -> Result<DietPlan, CoreError> {
        self.generate_plan(
            user_id,
            GeneratePlanInput {
                date: Some(today()),
                regenerate: false,
            },
        )
        .await
    }

    async fn plan_by_date(&self, user_id: &str, plan_date: NaiveDate) -> Result<DietPlan, CoreError> {
        self.diet_plan_repository
            .get(user_id, plan_date)
            .await?
            .ok_or(CoreError::NotFound)
    }

    async fn plan_history(
        &self,
        user_id: &str,
        limit: Option<u64>,
    ) -> Result<Vec<DietPlan>, CoreError> {
        self.diet_plan_repository
            .list_recent(user_id, clamp_history_limit(limit))
            .await
    }

    async fn plan_calendar(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PlanCalendar, CoreError> {
        validate_calendar_range(start, end)?;

        let mut dates: Vec<NaiveDate> = self
            .diet_plan_repository
            .list_between(user_id, start, end)
            .await?
            .into_iter()
            .map(|plan| plan.plan_date)
            .collect();
        dates.sort();
        dates.dedup();

        Ok(PlanCalendar { start, end, dates })
    }

    async fn substitute_meals(
        &self,
        user_id: &str,
        plan_date: NaiveDate,
        input: SubstitutionInput,
    ) -> Result<DietPlan, CoreError> {
        let requested = normalize_terms(input.unavailable_items);
        if requested.is_empty() {
            return Err(CoreError::Invalid(
                "at least one unavailable item is required".to_string(),
            ));
        }

        let existing = self.plan_by_date(user_id, plan_date).await?;
        let profile = self.require_profile(user_id).await?;

        let mut unavailable = existing.unavailable_items.clone();
        unavailable.extend(requested);
        let unavailable = normalize_terms(unavailable);

        let plan = compose_plan(
            &self.engine,
            &profile,
            plan_date,
            existing.strategy,
            unavailable,
        );
        self.store_plan(plan, Some(&existing)).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;
    use crate::{
        application::testing::{local_service, seed_profile},
        domain::{
            conversation::ports::ConversationService,
            feedback::{ports::FeedbackService, value_objects::SubmitFeedbackInput},
            meal_catalog::Condition,
        },
    };

    #[tokio::test]
    async fn generate_requires_a_profile() {
        let service = local_service().await;
        let result = service
            .generate_plan("ghost", GeneratePlanInput::default())
            .await;
        assert_eq!(result, Err(CoreError::NotFound));
    }

    #[tokio::test]
    async fn generate_rejects_past_dates() {
        let service = local_service().await;
        seed_profile(&service, "u-1", &["diabetes"], &[]).await;

        let yesterday = today() - Days::new(1);
        let result = service
            .generate_plan(
                "u-1",
                GeneratePlanInput {
                    date: Some(yesterday),
                    regenerate: false,
                },
            )
            .await;
        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn todays_plan_is_generated_once_and_logged() {
        let service = local_service().await;
        seed_profile(&service, "u-1", &["Type 2 diabetes"], &["nuts"]).await;

        let first = service.todays_plan("u-1").await.unwrap();
        let second = service.todays_plan("u-1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.condition, Condition::Diabetic);
        assert_eq!(first.strategy, PlanStrategy::Standard);
        assert!(first.unfilled_slots.is_empty());
        assert!(
            MealSlot::ALL
                .iter()
                .flat_map(|slot| first.meal_plan.slot(*slot))
                .all(|meal| !meal.to_lowercase().contains("nuts"))
        );

        let history = service.conversation_history("u-1", None).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].agent_name, PLANNER_AGENT);
    }

    #[tokio::test]
    async fn strategy_follows_previous_day_feedback() {
        let service = local_service().await;
        seed_profile(&service, "u-1", &[], &[]).await;

        service.todays_plan("u-1").await.unwrap();
        service
            .submit_feedback(
                "u-1",
                today(),
                SubmitFeedbackInput {
                    text: "Too hard to cook and I skipped lunch".to_string(),
                },
            )
            .await
            .unwrap();

        let tomorrow = service
            .generate_plan(
                "u-1",
                GeneratePlanInput {
                    date: Some(today() + Days::new(1)),
                    regenerate: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(tomorrow.strategy, PlanStrategy::Simplify);
        assert_eq!(tomorrow.meal_plan.breakfast.len(), 1);
    }

    #[tokio::test]
    async fn substitution_excludes_unavailable_items_and_keeps_feedback() {
        let service = local_service().await;
        seed_profile(&service, "u-1", &[], &[]).await;
        let plan = service.todays_plan("u-1").await.unwrap();
        service
            .submit_feedback(
                "u-1",
                today(),
                SubmitFeedbackInput {
                    text: "tasty".to_string(),
                },
            )
            .await
            .unwrap();

        let substituted = service
            .substitute_meals(
                "u-1",
                today(),
                SubstitutionInput {
                    unavailable_items: vec!["Vegetable".to_string(), " ".to_string()],
                },
            )
            .await
            .unwrap();

        assert_eq!(substituted.unavailable_items, vec!["Vegetable"]);
        assert_eq!(substituted.created_at, plan.created_at);
        assert_eq!(substituted.adherence_score, Some(1.0));
        assert!(
            substituted
                .meal_plan
                .breakfast
                .iter()
                .all(|meal| !meal.to_lowercase().contains("vegetable"))
        );

        let empty = service
            .substitute_meals(
                "u-1",
                today(),
                SubstitutionInput {
                    unavailable_items: vec!["  ".to_string()],
                },
            )
            .await;
        assert!(matches!(empty, Err(CoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn calendar_and_history_list_stored_dates() {
        let service = local_service().await;
        seed_profile(&service, "u-1", &[], &[]).await;

        let start = today();
        for offset in [0u64, 2, 5] {
            service
                .generate_plan(
                    "u-1",
                    GeneratePlanInput {
                        date: Some(start + Days::new(offset)),
                        regenerate: false,
                    },
                )
                .await
                .unwrap();
        }

        let calendar = service
            .plan_calendar("u-1", start, start + Days::new(3))
            .await
            .unwrap();
        assert_eq!(calendar.dates, vec![start, start + Days::new(2)]);

        let history = service.plan_history("u-1", Some(2)).await.unwrap();
        let dates: Vec<_> = history.iter().map(|p| p.plan_date).collect();
        assert_eq!(dates, vec![start + Days::new(5), start + Days::new(2)]);

        let too_wide = service
            .plan_calendar("u-1", start, start + Days::new(62))
            .await;
        assert!(matches!(too_wide, Err(CoreError::Invalid(_))));
    }
}
