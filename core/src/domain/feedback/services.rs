use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use tracing::info;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service, today},
    conversation::{
        entities::{ConversationEntry, FEEDBACK_AGENT},
        ports::ConversationRepository,
    },
    diet_plan::ports::DietPlanRepository,
    feedback::{
        entities::Feedback,
        ports::{FeedbackRepository, FeedbackService},
        scorer,
        value_objects::{
            FeedbackOutcome, FeedbackSummary, PlanAdjustment, SubmitFeedbackInput,
        },
    },
    health::ports::HealthCheckRepository,
    recommendation::value_objects::PlanStrategy,
    user_profile::ports::UserProfileRepository,
};

pub const DEFAULT_SUMMARY_DAYS: u32 = 7;
pub const MAX_SUMMARY_DAYS: u32 = 90;

/// Strategy for a plan, derived from the feedback left on the previous day's plan.
pub async fn next_plan_strategy<FB: FeedbackRepository>(
    feedback_repository: &FB,
    user_id: &str,
    plan_date: NaiveDate,
) -> Result<PlanStrategy, CoreError> {
    let Some(previous_day) = plan_date.pred_opt() else {
        return Ok(PlanStrategy::Standard);
    };

    let strategy: PlanStrategy = feedback_repository
        .get(user_id, previous_day)
        .await?
        .map(|feedback| PlanAdjustment::from_score(feedback.adherence_score).into())
        .unwrap_or_default();

    Ok(strategy)
}

/// Most frequent adjustment; ties go to `Simplify`.
fn dominant_adjustment(feedback: &[Feedback]) -> Option<PlanAdjustment> {
    let mut counts: HashMap<PlanAdjustment, usize> = HashMap::new();
    for item in feedback {
        *counts
            .entry(PlanAdjustment::from_score(item.adherence_score))
            .or_default() += 1;
    }

    let simplify = counts.get(&PlanAdjustment::Simplify).copied().unwrap_or(0);
    let variety = counts.get(&PlanAdjustment::AddVariety).copied().unwrap_or(0);
    match (simplify, variety) {
        (0, 0) => None,
        (s, v) if s >= v => Some(PlanAdjustment::Simplify),
        _ => Some(PlanAdjustment::AddVariety),
    }
}

impl<U, CV, DP, FB, HC> FeedbackService for Service<U, CV, DP, FB, HC>
where
    U: UserProfileRepository,
    CV: ConversationRepository,
    DP: DietPlanRepository,
    FB: FeedbackRepository,
    HC: HealthCheckRepository,
{
    async fn submit_feedback(
        &self,
        user_id: &str,
        plan_date: NaiveDate,
        input: SubmitFeedbackInput,
    ) -> Result<FeedbackOutcome, CoreError> {
        let text = input.text.trim().to_string();
        if text.is_empty() {
            return Err(CoreError::Invalid("feedback text must not be empty".to_string()));
        }

        let mut plan = self
            .diet_plan_repository
            .get(user_id, plan_date)
            .await?
            .ok_or(CoreError::NotFound)?;

        if plan.has_feedback() {
            return Err(CoreError::AlreadyExists);
        }

        let analysis = scorer::analyze(&text);
        let feedback = match self.feedback_repository.get(user_id, plan_date).await? {
            // Stored by an earlier attempt that failed before the plan was updated.
            Some(existing) if existing.text == text => existing,
            Some(_) => return Err(CoreError::AlreadyExists),
            None => {
                self.feedback_repository
                    .create(Feedback::new(
                        user_id.to_string(),
                        plan_date,
                        text.clone(),
                        &analysis,
                    ))
                    .await?
            }
        };

        plan.record_feedback(text, feedback.adherence_score);
        self.diet_plan_repository.save(plan).await?;

        info!(
            user_id,
            plan_date = %plan_date,
            adherence_score = analysis.adherence_score,
            sentiment = analysis.sentiment.as_str(),
            "feedback recorded"
        );

        let next = PlanStrategy::from(analysis.adjustment);
        self.conversation_repository
            .append(ConversationEntry::agent_response(
                user_id,
                FEEDBACK_AGENT,
                format!(
                    "Adherence {:.2} ({}). Next plan: {}",
                    analysis.adherence_score,
                    analysis.sentiment.as_str(),
                    next
                ),
            ))
            .await?;

        Ok(FeedbackOutcome { feedback, analysis })
    }

    async fn get_feedback(&self, user_id: &str, plan_date: NaiveDate) -> Result<Feedback, CoreError> {
        self.feedback_repository
            .get(user_id, plan_date)
            .await?
            .ok_or(CoreError::NotFound)
    }

    async fn feedback_summary(&self, user_id: &str, days: u32) -> Result<FeedbackSummary, CoreError> {
        if !(1..=MAX_SUMMARY_DAYS).contains(&days) {
            return Err(CoreError::Invalid(format!(
                "days must be between 1 and {MAX_SUMMARY_DAYS}"
            )));
        }

        let end = today();
        let start = end - Days::new(u64::from(days - 1));

        let plans = self
            .diet_plan_repository
            .list_between(user_id, start, end)
            .await?;
        let feedback = self
            .feedback_repository
            .list_between(user_id, start, end)
            .await?;

        let average_adherence = if feedback.is_empty() {
            None
        } else {
            let total: f64 = feedback.iter().map(|f| f.adherence_score).sum();
            Some((total / feedback.len() as f64 * 100.0).round() / 100.0)
        };

        Ok(FeedbackSummary {
            days,
            plans: plans.len(),
            plans_with_feedback: plans.iter().filter(|p| p.has_feedback()).count(),
            average_adherence,
            dominant_adjustment: dominant_adjustment(&feedback),
        })
    }
}
