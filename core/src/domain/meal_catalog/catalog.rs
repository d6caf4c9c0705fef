use std::{collections::BTreeMap, sync::LazyLock};

use crate::domain::meal_catalog::value_objects::{Condition, MealSlot};

/// Static mapping from (condition, slot) to an ordered list of meal names.
#[derive(Debug, Clone, Default)]
pub struct MealCatalog {
    entries: BTreeMap<(Condition, MealSlot), Vec<String>>,
}

static BUILTIN: LazyLock<MealCatalog> = LazyLock::new(|| {
    let mut catalog = MealCatalog::default();
    for (condition, slot, meals) in BUILTIN_MEALS {
        catalog.insert(*condition, *slot, meals.iter().map(|m| m.to_string()));
    }
    catalog
});

impl MealCatalog {
    /// The hand-authored catalog shipped with the application.
    pub fn builtin() -> &'static MealCatalog {
        &BUILTIN
    }

    pub fn insert(
        &mut self,
        condition: Condition,
        slot: MealSlot,
        meals: impl IntoIterator<Item = String>,
    ) {
        self.entries
            .insert((condition, slot), meals.into_iter().collect());
    }

    /// Candidates for an exact (slot, condition) pair, without any fallback.
    pub fn lookup(&self, slot: MealSlot, condition: Condition) -> Option<&[String]> {
        self.entries
            .get(&(condition, slot))
            .map(|meals| meals.as_slice())
    }
}

type CatalogRow = (Condition, MealSlot, &'static [&'static str]);

const BUILTIN_MEALS: &[CatalogRow] = &[
    (
        Condition::Diabetic,
        MealSlot::Breakfast,
        &[
            "Vegetable oats upma",
            "Moong dal chilla with mint chutney",
            "Greek yogurt with nuts",
            "Besan chilla with spinach",
            "Steel-cut oats with chia seeds",
        ],
    ),
    (
        Condition::Diabetic,
        MealSlot::Lunch,
        &[
            "Brown rice with dal and mixed vegetable sabzi",
            "Quinoa salad with chickpeas",
            "Multigrain roti with palak paneer",
            "Grilled chicken with sauteed greens",
            "Rajma with cauliflower rice",
        ],
    ),
    (
        Condition::Diabetic,
        MealSlot::Dinner,
        &[
            "Grilled fish with steamed broccoli",
            "Vegetable khichdi with millets",
            "Tofu stir-fry with bell peppers",
            "Lentil soup with side salad",
            "Paneer tikka with cucumber raita",
        ],
    ),
    (
        Condition::Diabetic,
        MealSlot::Snacks,
        &[
            "Roasted chana",
            "Cucumber and carrot sticks with hummus",
            "A handful of almonds",
            "Sprouts chaat",
            "Buttermilk",
        ],
    ),
    (
        Condition::Pcod,
        MealSlot::Breakfast,
        &[
            "Spinach and mushroom omelette",
            "Ragi dosa with coconut chutney",
            "Flaxseed smoothie with berries",
            "Poha with peanuts and vegetables",
            "Chia pudding with almond milk",
        ],
    ),
    (
        Condition::Pcod,
        MealSlot::Lunch,
        &[
            "Quinoa pulao with raita",
            "Grilled paneer salad",
            "Jowar roti with mixed dal",
            "Chicken and vegetable stew",
            "Brown rice with rajma",
        ],
    ),
    (
        Condition::Pcod,
        MealSlot::Dinner,
        &[
            "Baked salmon with asparagus",
            "Moong dal soup with sauteed vegetables",
            "Tofu and broccoli stir-fry",
            "Vegetable dalia",
            "Grilled chicken with quinoa",
        ],
    ),
    (
        Condition::Pcod,
        MealSlot::Snacks,
        &[
            "Pumpkin seeds",
            "Apple slices with peanut butter",
            "Green tea with roasted makhana",
            "Greek yogurt with berries",
            "Walnuts",
        ],
    ),
    (
        Condition::Cardiac,
        MealSlot::Breakfast,
        &[
            "Oatmeal with berries",
            "Whole wheat toast with avocado",
            "Vegetable poha",
            "Egg white omelette with spinach",
            "Fruit bowl with flaxseeds",
        ],
    ),
    (
        Condition::Cardiac,
        MealSlot::Lunch,
        &[
            "Grilled fish with brown rice",
            "Lentil and vegetable soup with multigrain roti",
            "Chickpea salad with olive oil dressing",
            "Steamed vegetables with quinoa",
            "Dal with bajra roti",
        ],
    ),
    (
        Condition::Cardiac,
        MealSlot::Dinner,
        &[
            "Baked chicken breast with steamed vegetables",
            "Vegetable soup with whole grain bread",
            "Grilled tofu with sauteed greens",
            "Moong dal khichdi",
            "Salmon with roasted sweet potato",
        ],
    ),
    (
        Condition::Cardiac,
        MealSlot::Snacks,
        &[
            "Unsalted almonds",
            "Fresh fruit salad",
            "Low-fat yogurt",
            "Roasted makhana",
            "Carrot sticks with hummus",
        ],
    ),
    (
        Condition::General,
        MealSlot::Breakfast,
        &[
            "Idli with sambar",
            "Vegetable upma",
            "Whole wheat toast with peanut butter and banana",
            "Masala oats",
            "Boiled eggs with fruit",
        ],
    ),
    (
        Condition::General,
        MealSlot::Lunch,
        &[
            "Chapati with dal and vegetable curry",
            "Vegetable biryani with raita",
            "Chicken curry with brown rice",
            "Paneer wrap with salad",
            "Curd rice with pickle",
        ],
    ),
    (
        Condition::General,
        MealSlot::Dinner,
        &[
            "Vegetable pulao with raita",
            "Grilled chicken with roti and salad",
            "Dal tadka with jeera rice",
            "Paneer bhurji with chapati",
            "Mixed vegetable soup with garlic bread",
        ],
    ),
    (
        Condition::General,
        MealSlot::Snacks,
        &[
            "Fruit chaat",
            "Roasted peanuts",
            "Sprouts salad",
            "Yogurt with honey",
            "Vegetable sandwich",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_condition_and_slot() {
        let catalog = MealCatalog::builtin();
        for condition in [
            Condition::Diabetic,
            Condition::Pcod,
            Condition::Cardiac,
            Condition::General,
        ] {
            for slot in MealSlot::ALL {
                let meals = catalog
                    .lookup(slot, condition)
                    .unwrap_or_else(|| panic!("missing {condition}/{slot}"));
                assert!(!meals.is_empty(), "{condition}/{slot} has no meals");
            }
        }
        assert_eq!(catalog.entries.len(), 16);
    }

    #[test]
    fn lookup_misses_for_partial_catalogs() {
        let mut catalog = MealCatalog::default();
        catalog.insert(
            Condition::General,
            MealSlot::Lunch,
            vec!["Dal rice".to_string()],
        );
        assert!(catalog.lookup(MealSlot::Lunch, Condition::Cardiac).is_none());
        assert_eq!(
            catalog.lookup(MealSlot::Lunch, Condition::General),
            Some(&["Dal rice".to_string()][..])
        );
    }
}
