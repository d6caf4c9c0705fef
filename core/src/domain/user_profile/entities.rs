use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::generate_timestamp,
    meal_catalog::Condition,
    user_profile::value_objects::{BmiCategory, UpsertProfileInput},
};

pub const DEFAULT_AGE: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub health_conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub dietary_preferences: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user_id: String, input: UpsertProfileInput) -> Self {
        let (now, _) = generate_timestamp();
        let bmi = compute_bmi(input.height_cm, input.weight_kg);

        Self {
            user_id,
            name: input.name.trim().to_string(),
            age: input.age.unwrap_or(DEFAULT_AGE),
            gender: input.gender.unwrap_or_default().trim().to_string(),
            height_cm: input.height_cm,
            weight_kg: input.weight_kg,
            bmi,
            health_conditions: normalize_terms(input.health_conditions),
            allergies: normalize_terms(input.allergies),
            dietary_preferences: normalize_terms(input.dietary_preferences),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every editable field, keeping the identity and creation time.
    pub fn replace(&mut self, input: UpsertProfileInput) {
        let replacement = UserProfile::new(self.user_id.clone(), input);
        *self = UserProfile {
            created_at: self.created_at,
            ..replacement
        };
    }

    pub fn primary_condition(&self) -> Condition {
        Condition::resolve_primary(&self.health_conditions)
    }

    pub fn bmi_category(&self) -> Option<BmiCategory> {
        self.bmi.map(BmiCategory::from_bmi)
    }
}

/// Body mass index rounded to one decimal, when both measurements are usable.
pub fn compute_bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    match (height_cm, weight_kg) {
        (Some(height), Some(weight)) if height > 0.0 && weight > 0.0 => {
            let meters = height / 100.0;
            Some((weight / (meters * meters) * 10.0).round() / 10.0)
        }
        _ => None,
    }
}

/// Trims entries, drops blanks and case-insensitive duplicates, keeping first-seen order.
pub fn normalize_terms(terms: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    terms
        .into_iter()
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty() && seen.insert(term.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> UpsertProfileInput {
        UpsertProfileInput {
            name: "  Asha ".to_string(),
            age: None,
            gender: Some("female".to_string()),
            height_cm: Some(160.0),
            weight_kg: Some(64.0),
            health_conditions: vec!["Type 2 diabetes".to_string(), " ".to_string()],
            allergies: vec!["Nuts".to_string(), "nuts ".to_string()],
            dietary_preferences: vec![],
        }
    }

    #[test]
    fn bmi_is_rounded_to_one_decimal() {
        assert_eq!(compute_bmi(Some(160.0), Some(64.0)), Some(25.0));
        assert_eq!(compute_bmi(Some(175.0), Some(70.0)), Some(22.9));
        assert_eq!(compute_bmi(Some(0.0), Some(70.0)), None);
        assert_eq!(compute_bmi(None, Some(70.0)), None);
    }

    #[test]
    fn new_profile_normalizes_input() {
        let profile = UserProfile::new("u-1".to_string(), input());
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.age, DEFAULT_AGE);
        assert_eq!(profile.health_conditions, vec!["Type 2 diabetes"]);
        assert_eq!(profile.allergies, vec!["Nuts"]);
        assert_eq!(profile.bmi_category(), Some(BmiCategory::Overweight));
        assert_eq!(profile.primary_condition(), Condition::Diabetic);
    }

    #[test]
    fn replace_keeps_created_at() {
        let mut profile = UserProfile::new("u-1".to_string(), input());
        let created_at = profile.created_at;
        let mut edited = input();
        edited.health_conditions = vec!["high cholesterol".to_string()];
        edited.weight_kg = None;

        profile.replace(edited);

        assert_eq!(profile.created_at, created_at);
        assert_eq!(profile.user_id, "u-1");
        assert_eq!(profile.bmi, None);
        assert_eq!(profile.primary_condition(), Condition::Cardiac);
    }
}
