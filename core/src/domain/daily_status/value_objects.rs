use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyStatus {
    pub date: NaiveDate,
    pub has_diet_plan: bool,
    pub has_feedback: bool,
    pub last_interaction: Option<NaiveDate>,
    /// `None` for a user who never interacted.
    pub days_since_last_interaction: Option<i64>,
    pub is_new_day: bool,
    pub should_create_plan: bool,
    pub should_collect_feedback: bool,
}

impl DailyStatus {
    /// `today` is the server's current date; feedback is never requested for a later plan.
    pub fn new(
        date: NaiveDate,
        today: NaiveDate,
        has_diet_plan: bool,
        has_feedback: bool,
        last_interaction: Option<NaiveDate>,
    ) -> Self {
        let days_since_last_interaction = last_interaction.map(|last| (date - last).num_days());
        let is_new_day = !has_diet_plan && last_interaction.is_none_or(|last| date > last);

        Self {
            date,
            has_diet_plan,
            has_feedback,
            last_interaction,
            days_since_last_interaction,
            is_new_day,
            should_create_plan: !has_diet_plan || is_new_day,
            should_collect_feedback: has_diet_plan && !has_feedback && date <= today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyOverview {
    pub status: DailyStatus,
    pub greeting: String,
    pub feedback_prompt: Option<String>,
}
