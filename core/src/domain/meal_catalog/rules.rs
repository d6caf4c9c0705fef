use std::{collections::BTreeMap, sync::LazyLock};

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::meal_catalog::value_objects::Condition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NutritionRule {
    pub avoid: Vec<String>,
    pub prefer: Vec<String>,
    pub notes: Vec<String>,
}

impl NutritionRule {
    fn from_static(avoid: &[&str], prefer: &[&str], notes: &[&str]) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            avoid: owned(avoid),
            prefer: owned(prefer),
            notes: owned(notes),
        }
    }

    /// Notes rendered onto a plan: the rule notes plus one avoid line and one prefer line.
    pub fn plan_notes(&self) -> Vec<String> {
        let mut notes = self.notes.clone();
        if !self.avoid.is_empty() {
            notes.push(format!("Avoid: {}", self.avoid.join(", ")));
        }
        if !self.prefer.is_empty() {
            notes.push(format!("Prefer: {}", self.prefer.join(", ")));
        }
        notes
    }
}

#[derive(Debug, Clone, Default)]
pub struct NutritionRules {
    rules: BTreeMap<Condition, NutritionRule>,
}

static BUILTIN: LazyLock<NutritionRules> = LazyLock::new(|| {
    let mut rules = NutritionRules::default();
    rules.insert(
        Condition::Diabetic,
        NutritionRule::from_static(
            &["sugar", "white rice", "white bread", "sweets", "juice", "honey"],
            &["oats", "dal", "millet", "vegetable", "nuts", "quinoa", "chia"],
            &[
                "Keep carbohydrate portions consistent across meals",
                "Prefer low glycemic index grains and pair carbs with protein",
                "Monitor blood sugar before and two hours after meals",
            ],
        ),
    );
    rules.insert(
        Condition::Pcod,
        NutritionRule::from_static(
            &["sugar", "refined flour", "maida", "fried", "soda", "white bread"],
            &["flaxseed", "spinach", "quinoa", "seeds", "berries", "tofu", "dal"],
            &[
                "Favor high-fibre, low glycemic meals to support insulin sensitivity",
                "Include omega-3 sources such as flaxseed and walnuts",
                "Limit refined carbohydrates and sugary drinks",
            ],
        ),
    );
    rules.insert(
        Condition::Cardiac,
        NutritionRule::from_static(
            &["fried", "butter", "pickle", "red meat", "ghee", "cream", "chips"],
            &["oats", "fish", "salmon", "olive oil", "vegetable", "flaxseed", "lentil"],
            &[
                "Keep sodium under 1,500 mg per day",
                "Choose unsaturated fats such as olive oil and nuts",
                "Prefer steamed, grilled or baked preparations",
            ],
        ),
    );
    rules.insert(
        Condition::General,
        NutritionRule::from_static(
            &["fried", "sugar"],
            &["vegetable", "dal", "fruit"],
            &[
                "Drink at least eight glasses of water a day",
                "Fill half the plate with vegetables",
                "Keep regular meal timings",
            ],
        ),
    );
    rules
});

impl NutritionRules {
    pub fn builtin() -> &'static NutritionRules {
        &BUILTIN
    }

    pub fn insert(&mut self, condition: Condition, rule: NutritionRule) {
        self.rules.insert(condition, rule);
    }

    pub fn get(&self, condition: Condition) -> Option<&NutritionRule> {
        self.rules.get(&condition)
    }
}

const MEAT_TERMS: &[&str] = &[
    "chicken", "fish", "salmon", "mutton", "beef", "pork", "prawn", "shrimp", "tuna", "meat",
];

const ANIMAL_PRODUCT_TERMS: &[&str] = &[
    "egg",
    "omelette",
    "paneer",
    "yogurt",
    "curd",
    "cheese",
    "ghee",
    "honey",
    "raita",
    "buttermilk",
];

const GLUTEN_TERMS: &[&str] = &[
    "wheat",
    "barley",
    "rye",
    "bread",
    "pasta",
    "chapati",
    "toast",
    "semolina",
    "dalia",
    "multigrain",
];

/// Exclusion terms implied by a free-text dietary preference.
///
/// Unrecognized preferences add nothing.
pub fn preference_exclusions(preference: &str) -> Vec<&'static str> {
    let normalized = preference.trim().to_lowercase().replace(['-', '_'], " ");
    match normalized.as_str() {
        "vegetarian" | "veg" => MEAT_TERMS.to_vec(),
        "vegan" => MEAT_TERMS
            .iter()
            .chain(ANIMAL_PRODUCT_TERMS)
            .copied()
            .collect(),
        "gluten free" | "no gluten" | "celiac" => GLUTEN_TERMS.to_vec(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_condition_has_a_rule() {
        let rules = NutritionRules::builtin();
        for condition in [
            Condition::Diabetic,
            Condition::Pcod,
            Condition::Cardiac,
            Condition::General,
        ] {
            let rule = rules.get(condition).expect("rule present");
            assert!(!rule.notes.is_empty());
        }
    }

    #[test]
    fn plan_notes_append_avoid_and_prefer_lines() {
        let rule = NutritionRule::from_static(&["fried"], &["dal", "fruit"], &["Eat slowly"]);
        assert_eq!(
            rule.plan_notes(),
            vec![
                "Eat slowly".to_string(),
                "Avoid: fried".to_string(),
                "Prefer: dal, fruit".to_string(),
            ]
        );
    }

    #[test]
    fn vegan_extends_vegetarian_exclusions() {
        let vegetarian = preference_exclusions("Vegetarian");
        let vegan = preference_exclusions(" vegan ");
        assert!(vegetarian.iter().all(|term| vegan.contains(term)));
        assert!(vegan.contains(&"paneer"));
        assert!(!vegetarian.contains(&"paneer"));
        assert_eq!(preference_exclusions("gluten-free"), GLUTEN_TERMS.to_vec());
        assert!(preference_exclusions("keto").is_empty());
    }
}
