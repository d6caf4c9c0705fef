//! Read-only meal and nutrition tables keyed by health condition and meal slot.

pub mod catalog;
pub mod rules;
pub mod value_objects;

pub use catalog::MealCatalog;
pub use rules::{NutritionRule, NutritionRules, preference_exclusions};
pub use value_objects::{Condition, MealSlot};
