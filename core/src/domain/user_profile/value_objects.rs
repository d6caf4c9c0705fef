use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpsertProfileInput {
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub health_conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub dietary_preferences: Vec<String>,
}

impl UpsertProfileInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Invalid("name must not be empty".to_string()));
        }
        if let Some(age) = self.age {
            if !(1..=120).contains(&age) {
                return Err(CoreError::Invalid(format!(
                    "age must be between 1 and 120, got {age}"
                )));
            }
        }
        for (field, value) in [("height_cm", self.height_cm), ("weight_kg", self.weight_kg)] {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(CoreError::Invalid(format!("{field} must be positive")));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::NormalWeight
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut input = UpsertProfileInput {
            name: "Ravi".to_string(),
            ..Default::default()
        };
        assert!(input.validate().is_ok());

        input.age = Some(0);
        assert!(matches!(input.validate(), Err(CoreError::Invalid(_))));

        input.age = Some(45);
        input.weight_kg = Some(-3.0);
        assert!(matches!(input.validate(), Err(CoreError::Invalid(_))));

        input.weight_kg = None;
        input.name = "   ".to_string();
        assert!(matches!(input.validate(), Err(CoreError::Invalid(_))));
    }

    #[test]
    fn bmi_category_thresholds() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }
}
