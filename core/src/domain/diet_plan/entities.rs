use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::{daily_document_id, generate_timestamp},
    meal_catalog::{Condition, MealSlot},
    recommendation::value_objects::PlanStrategy,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MealPlan {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub snacks: Vec<String>,
    pub notes: Vec<String>,
}

impl MealPlan {
    pub fn slot(&self, slot: MealSlot) -> &[String] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    pub fn set_slot(&mut self, slot: MealSlot, meals: Vec<String>) {
        match slot {
            MealSlot::Breakfast => self.breakfast = meals,
            MealSlot::Lunch => self.lunch = meals,
            MealSlot::Dinner => self.dinner = meals,
            MealSlot::Snacks => self.snacks = meals,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DietPlan {
    pub user_id: String,
    pub plan_date: NaiveDate,
    pub meal_plan: MealPlan,
    pub condition: Condition,
    pub strategy: PlanStrategy,
    /// Slots the engine could not fill after every fallback.
    pub unfilled_slots: Vec<MealSlot>,
    /// Items the user reported as unavailable for this plan.
    pub unavailable_items: Vec<String>,
    pub feedback_text: Option<String>,
    pub adherence_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DietPlanConfig {
    pub user_id: String,
    pub plan_date: NaiveDate,
    pub meal_plan: MealPlan,
    pub condition: Condition,
    pub strategy: PlanStrategy,
    pub unfilled_slots: Vec<MealSlot>,
    pub unavailable_items: Vec<String>,
}

impl DietPlan {
    pub fn new(config: DietPlanConfig) -> Self {
        let (now, _) = generate_timestamp();

        Self {
            user_id: config.user_id,
            plan_date: config.plan_date,
            meal_plan: config.meal_plan,
            condition: config.condition,
            strategy: config.strategy,
            unfilled_slots: config.unfilled_slots,
            unavailable_items: config.unavailable_items,
            feedback_text: None,
            adherence_score: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn document_id(&self) -> String {
        daily_document_id(&self.user_id, self.plan_date)
    }

    /// Carries identity and feedback of the plan being regenerated.
    pub fn succeed(mut self, previous: &DietPlan) -> Self {
        self.created_at = previous.created_at;
        self.feedback_text = previous.feedback_text.clone();
        self.adherence_score = previous.adherence_score;
        self
    }

    pub fn record_feedback(&mut self, text: String, adherence_score: f64) {
        let (now, _) = generate_timestamp();

        self.feedback_text = Some(text);
        self.adherence_score = Some(adherence_score);
        self.updated_at = now;
    }

    pub fn has_feedback(&self) -> bool {
        self.feedback_text.is_some()
    }
}
