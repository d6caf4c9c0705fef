use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::domain::{
    meal_catalog::{Condition, MealCatalog, MealSlot, NutritionRules},
    recommendation::value_objects::{
        ExclusionTerms, MealSelection, PlanStrategy, Recommendation, RecommendationRequest,
    },
};

/// Pure recommendation function over read-only tables.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Arc<MealCatalog>,
    rules: Arc<NutritionRules>,
    meals_per_slot: usize,
}

impl RecommendationEngine {
    pub fn new(catalog: MealCatalog, rules: NutritionRules, meals_per_slot: usize) -> Self {
        Self {
            catalog: Arc::new(catalog),
            rules: Arc::new(rules),
            meals_per_slot: meals_per_slot.max(1),
        }
    }

    pub fn builtin(meals_per_slot: usize) -> Self {
        Self::new(
            MealCatalog::builtin().clone(),
            NutritionRules::builtin().clone(),
            meals_per_slot,
        )
    }

    pub fn meals_per_slot(&self) -> usize {
        self.meals_per_slot
    }

    pub fn recommend(&self, request: &RecommendationRequest) -> Recommendation {
        let (candidates, used_general_fallback) =
            self.candidates(request.slot, request.condition, &request.exclusions);

        let selection = if candidates.is_empty() {
            debug!(
                condition = %request.condition,
                slot = %request.slot,
                "no meal left after exclusions"
            );
            MealSelection::NoSuitableMeal
        } else {
            let ordered = self.prefer_first(request.condition, candidates);
            MealSelection::Meals(self.select(ordered, request.strategy, request.plan_date))
        };

        Recommendation {
            condition: request.condition,
            slot: request.slot,
            strategy: request.strategy,
            selection,
            used_general_fallback,
            notes: self.notes(request.condition),
        }
    }

    /// Rule notes for a condition, falling back to the general rule.
    pub fn notes(&self, condition: Condition) -> Vec<String> {
        self.rules
            .get(condition)
            .or_else(|| self.rules.get(Condition::General))
            .map(|rule| rule.plan_notes())
            .unwrap_or_default()
    }

    /// Filtered candidates in catalog order, and whether the general bucket was used.
    fn candidates(
        &self,
        slot: MealSlot,
        condition: Condition,
        exclusions: &ExclusionTerms,
    ) -> (Vec<String>, bool) {
        if let Some(meals) = self.catalog.lookup(slot, condition) {
            let kept = filter(meals, exclusions);
            if !kept.is_empty() || condition == Condition::General {
                return (kept, false);
            }
        }

        let Some(general) = self.catalog.lookup(slot, Condition::General) else {
            return (Vec::new(), condition != Condition::General);
        };

        // The condition's avoid terms narrow the general list first. When that
        // leaves nothing, only the caller's own exclusions apply.
        if let Some(rule) = self.rules.get(condition) {
            let mut widened = exclusions.clone();
            widened.extend(&rule.avoid);
            let kept = filter(general, &widened);
            if !kept.is_empty() {
                return (kept, true);
            }
        }
        (filter(general, exclusions), true)
    }

    fn prefer_first(&self, condition: Condition, mut candidates: Vec<String>) -> Vec<String> {
        let Some(rule) = self.rules.get(condition) else {
            return candidates;
        };
        let preferred = ExclusionTerms::new(&rule.prefer);
        if preferred.is_empty() {
            return candidates;
        }
        // `sort_by_key` is stable, so catalog order survives within each group.
        candidates.sort_by_key(|meal| !preferred.excludes(meal));
        candidates
    }

    fn select(
        &self,
        candidates: Vec<String>,
        strategy: PlanStrategy,
        plan_date: NaiveDate,
    ) -> Vec<String> {
        match strategy {
            PlanStrategy::Standard => candidates.into_iter().take(self.meals_per_slot).collect(),
            PlanStrategy::Simplify => candidates.into_iter().take(1).collect(),
            PlanStrategy::AddVariety => {
                let len = candidates.len();
                let start = plan_date.ordinal() as usize % len;
                (0..self.meals_per_slot.min(len))
                    .map(|i| candidates[(start + i) % len].clone())
                    .collect()
            }
        }
    }
}

fn filter(meals: &[String], exclusions: &ExclusionTerms) -> Vec<String> {
    meals
        .iter()
        .filter(|meal| !exclusions.excludes(meal))
        .cloned()
        .collect()
}
