use std::str::FromStr;

use sea_orm::ActiveValue::Set;
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        diet_plan::entities::{DietPlan, MealPlan},
        meal_catalog::MealSlot,
    },
    entity::diet_plans,
    infrastructure::{
        firestore::codec::Fields,
        local::{decode_list, encode_list},
    },
};

fn parse_field<T>(field: &str, raw: &str) -> Result<T, CoreError>
where
    T: FromStr<Err = String>,
{
    raw.parse().map_err(|e| {
        error!("Stored diet plan has invalid {}: {}", field, e);
        CoreError::InternalServerError
    })
}

fn parse_slots(raw: Vec<String>) -> Result<Vec<MealSlot>, CoreError> {
    raw.iter().map(|s| parse_field("slot", s)).collect()
}

fn slot_names(slots: &[MealSlot]) -> Vec<String> {
    slots.iter().map(|s| s.as_str().to_string()).collect()
}

impl TryFrom<diet_plans::Model> for DietPlan {
    type Error = CoreError;

    fn try_from(model: diet_plans::Model) -> Result<Self, Self::Error> {
        let meal_plan: MealPlan = serde_json::from_str(&model.meal_plan).map_err(|e| {
            error!("Failed to decode stored meal plan {}: {}", model.id, e);
            CoreError::InternalServerError
        })?;

        Ok(Self {
            user_id: model.user_id,
            plan_date: model.plan_date,
            meal_plan,
            condition: parse_field("condition", &model.condition)?,
            strategy: parse_field("strategy", &model.strategy)?,
            unfilled_slots: parse_slots(decode_list(&model.unfilled_slots)?)?,
            unavailable_items: decode_list(&model.unavailable_items)?,
            feedback_text: model.feedback_text,
            adherence_score: model.adherence_score,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        })
    }
}

impl From<&DietPlan> for diet_plans::ActiveModel {
    fn from(plan: &DietPlan) -> Self {
        Self {
            id: Set(plan.document_id()),
            user_id: Set(plan.user_id.clone()),
            plan_date: Set(plan.plan_date),
            meal_plan: Set(serde_json::to_string(&plan.meal_plan).unwrap_or_default()),
            condition: Set(plan.condition.as_str().to_string()),
            strategy: Set(plan.strategy.as_str().to_string()),
            unfilled_slots: Set(encode_list(&slot_names(&plan.unfilled_slots))),
            unavailable_items: Set(encode_list(&plan.unavailable_items)),
            feedback_text: Set(plan.feedback_text.clone()),
            adherence_score: Set(plan.adherence_score),
            created_at: Set(plan.created_at.fixed_offset()),
            updated_at: Set(plan.updated_at.fixed_offset()),
        }
    }
}

fn meal_plan_to_fields(meal_plan: &MealPlan) -> Fields {
    Fields::new()
        .strings("breakfast", &meal_plan.breakfast)
        .strings("lunch", &meal_plan.lunch)
        .strings("dinner", &meal_plan.dinner)
        .strings("snacks", &meal_plan.snacks)
        .strings("notes", &meal_plan.notes)
}

fn meal_plan_from_fields(fields: &Fields) -> Result<MealPlan, CoreError> {
    Ok(MealPlan {
        breakfast: fields.get_strings("breakfast")?,
        lunch: fields.get_strings("lunch")?,
        dinner: fields.get_strings("dinner")?,
        snacks: fields.get_strings("snacks")?,
        notes: fields.get_strings("notes")?,
    })
}

pub fn plan_to_fields(plan: &DietPlan) -> Fields {
    Fields::new()
        .string("user_id", &plan.user_id)
        .date("plan_date", plan.plan_date)
        .map("meal_plan", meal_plan_to_fields(&plan.meal_plan))
        .string("condition", plan.condition.as_str())
        .string("strategy", plan.strategy.as_str())
        .strings("unfilled_slots", &slot_names(&plan.unfilled_slots))
        .strings("unavailable_items", &plan.unavailable_items)
        .opt_string("feedback_text", plan.feedback_text.as_deref())
        .opt_double("adherence_score", plan.adherence_score)
        .timestamp("created_at", plan.created_at)
        .timestamp("updated_at", plan.updated_at)
}

pub fn plan_from_fields(fields: &Fields) -> Result<DietPlan, CoreError> {
    Ok(DietPlan {
        user_id: fields.get_string("user_id")?,
        plan_date: fields.get_date("plan_date")?,
        meal_plan: meal_plan_from_fields(&fields.get_map("meal_plan")?)?,
        condition: parse_field("condition", &fields.get_string("condition")?)?,
        strategy: parse_field("strategy", &fields.get_string("strategy")?)?,
        unfilled_slots: parse_slots(fields.get_strings("unfilled_slots")?)?,
        unavailable_items: fields.get_strings("unavailable_items")?,
        feedback_text: fields.get_opt_string("feedback_text")?,
        adherence_score: fields.get_opt_f64("adherence_score")?,
        created_at: fields.get_timestamp("created_at")?,
        updated_at: fields.get_timestamp("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{
        diet_plan::entities::DietPlanConfig, meal_catalog::Condition,
        recommendation::value_objects::PlanStrategy,
    };

    #[test]
    fn plan_survives_document_encoding() {
        let mut plan = DietPlan::new(DietPlanConfig {
            user_id: "u-1".to_string(),
            plan_date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            meal_plan: MealPlan {
                breakfast: vec!["Vegetable poha".to_string()],
                lunch: vec![],
                dinner: vec!["Moong dal khichdi".to_string()],
                snacks: vec!["Roasted makhana".to_string()],
                notes: vec!["Keep sodium under 1,500 mg per day".to_string()],
            },
            condition: Condition::Cardiac,
            strategy: PlanStrategy::AddVariety,
            unfilled_slots: vec![MealSlot::Lunch],
            unavailable_items: vec!["fish".to_string()],
        });
        plan.record_feedback("easy".to_string(), 1.0);

        let json = serde_json::to_string(&plan_to_fields(&plan)).unwrap();
        let decoded: Fields = serde_json::from_str(&json).unwrap();
        assert_eq!(plan_from_fields(&decoded).unwrap(), plan);
    }
}
