use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::meal_catalog::{Condition, MealSlot, preference_exclusions};

/// Which selection policy a plan is generated under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanStrategy {
    #[default]
    Standard,
    Simplify,
    AddVariety,
}

impl PlanStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStrategy::Standard => "standard",
            PlanStrategy::Simplify => "simplify",
            PlanStrategy::AddVariety => "add_variety",
        }
    }
}

impl fmt::Display for PlanStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(PlanStrategy::Standard),
            "simplify" => Ok(PlanStrategy::Simplify),
            "add_variety" => Ok(PlanStrategy::AddVariety),
            other => Err(format!("unknown plan strategy `{other}`")),
        }
    }
}

/// Lowercased substring terms a selected meal must not contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionTerms(Vec<String>);

impl ExclusionTerms {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut exclusions = Self::default();
        exclusions.extend(terms);
        exclusions
    }

    /// Allergies plus whatever the dietary preferences imply.
    pub fn for_profile<S: AsRef<str>>(allergies: &[S], dietary_preferences: &[S]) -> Self {
        let mut exclusions = Self::new(allergies);
        for preference in dietary_preferences {
            exclusions.extend(preference_exclusions(preference.as_ref()));
        }
        exclusions
    }

    pub fn extend<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !self.0.contains(&term) {
                self.0.push(term);
            }
        }
    }

    pub fn excludes(&self, meal: &str) -> bool {
        let meal = meal.to_lowercase();
        self.0.iter().any(|term| meal.contains(term.as_str()))
    }

    pub fn terms(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub condition: Condition,
    pub slot: MealSlot,
    pub exclusions: ExclusionTerms,
    pub strategy: PlanStrategy,
    pub plan_date: NaiveDate,
}

/// Engine outcome for one slot. An empty candidate set is a value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealSelection {
    Meals(Vec<String>),
    NoSuitableMeal,
}

impl MealSelection {
    pub fn meals(&self) -> &[String] {
        match self {
            MealSelection::Meals(meals) => meals,
            MealSelection::NoSuitableMeal => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, MealSelection::NoSuitableMeal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub condition: Condition,
    pub slot: MealSlot,
    pub strategy: PlanStrategy,
    pub selection: MealSelection,
    /// Set when the general bucket supplied the candidates.
    pub used_general_fallback: bool,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RecommendInput {
    pub slot: MealSlot,
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_terms_ignore_blanks_and_case() {
        let exclusions = ExclusionTerms::new(["  NUTS ", "", "   ", "nuts"]);
        assert_eq!(exclusions.terms(), &["nuts".to_string()]);
        assert!(exclusions.excludes("Greek yogurt with Nuts"));
        assert!(!exclusions.excludes("Vegetable oats upma"));
    }

    #[test]
    fn profile_exclusions_include_preference_terms() {
        let allergies = vec!["peanut".to_string()];
        let preferences = vec!["vegetarian".to_string()];
        let exclusions = ExclusionTerms::for_profile(&allergies, &preferences);
        assert!(exclusions.excludes("Roasted peanuts"));
        assert!(exclusions.excludes("Grilled chicken with quinoa"));
        assert!(!exclusions.excludes("Vegetable khichdi with millets"));
    }
}
