use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snacks",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" | "snacks" => Ok(MealSlot::Snacks),
            other => Err(format!(
                "unknown meal slot `{other}`; expected breakfast|lunch|dinner|snacks"
            )),
        }
    }
}

/// Recognized health category driving meal and rule selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Diabetic,
    Pcod,
    Cardiac,
    General,
}

impl Condition {
    /// Resolution order when a user reports more than one condition.
    pub const PRIORITY: [Condition; 3] = [Condition::Diabetic, Condition::Cardiac, Condition::Pcod];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Diabetic => "diabetic",
            Condition::Pcod => "pcod",
            Condition::Cardiac => "cardiac",
            Condition::General => "general",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Condition::Diabetic => &["diabet", "blood sugar", "insulin"],
            Condition::Cardiac => &[
                "cardiac",
                "heart",
                "hypertension",
                "blood pressure",
                "cholesterol",
            ],
            Condition::Pcod => &["pcod", "pcos", "polycystic"],
            Condition::General => &["general"],
        }
    }

    /// Whether a free-text condition reported by a user names this category.
    pub fn matches(&self, reported: &str) -> bool {
        let reported = reported.trim().to_lowercase();
        !reported.is_empty() && self.aliases().iter().any(|alias| reported.contains(alias))
    }

    /// Picks the primary condition out of a user's free-text condition set.
    ///
    /// The first category of [`Condition::PRIORITY`] matched by any entry wins;
    /// anything unrecognized resolves to [`Condition::General`].
    pub fn resolve_primary<S: AsRef<str>>(reported: &[S]) -> Condition {
        Condition::PRIORITY
            .into_iter()
            .find(|condition| reported.iter().any(|r| condition.matches(r.as_ref())))
            .unwrap_or(Condition::General)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diabetic" => Ok(Condition::Diabetic),
            "pcod" => Ok(Condition::Pcod),
            "cardiac" => Ok(Condition::Cardiac),
            "general" => Ok(Condition::General),
            other => Err(format!("unknown condition `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_primary_follows_priority_order() {
        let reported = ["PCOS", "High blood pressure", "Type 2 Diabetes"];
        assert_eq!(Condition::resolve_primary(&reported), Condition::Diabetic);

        let reported = ["polycystic ovaries", "heart disease"];
        assert_eq!(Condition::resolve_primary(&reported), Condition::Cardiac);

        let reported = ["PCOD"];
        assert_eq!(Condition::resolve_primary(&reported), Condition::Pcod);
    }

    #[test]
    fn resolve_primary_defaults_to_general() {
        let empty: [&str; 0] = [];
        assert_eq!(Condition::resolve_primary(&empty), Condition::General);
        assert_eq!(
            Condition::resolve_primary(&["thyroid", "  "]),
            Condition::General
        );
    }

    #[test]
    fn meal_slot_parses_singular_snack() {
        assert_eq!("Snack".parse::<MealSlot>().unwrap(), MealSlot::Snacks);
        assert!("brunch".parse::<MealSlot>().is_err());
    }
}
