use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use vitaplan_core::domain::user_profile::value_objects::UpsertProfileInput;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertProfileValidator {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,

    #[validate(range(min = 1, max = 120, message = "age must be between 1 and 120"))]
    #[serde(default)]
    pub age: Option<u32>,

    #[serde(default)]
    pub gender: Option<String>,

    #[validate(range(min = 30.0, max = 300.0, message = "height_cm must be between 30 and 300"))]
    #[serde(default)]
    pub height_cm: Option<f64>,

    #[validate(range(min = 2.0, max = 500.0, message = "weight_kg must be between 2 and 500"))]
    #[serde(default)]
    pub weight_kg: Option<f64>,

    #[serde(default)]
    pub health_conditions: Vec<String>,

    #[serde(default)]
    pub allergies: Vec<String>,

    #[serde(default)]
    pub dietary_preferences: Vec<String>,
}

impl From<UpsertProfileValidator> for UpsertProfileInput {
    fn from(payload: UpsertProfileValidator) -> Self {
        Self {
            name: payload.name,
            age: payload.age,
            gender: payload.gender,
            height_cm: payload.height_cm,
            weight_kg: payload.weight_kg,
            health_conditions: payload.health_conditions,
            allergies: payload.allergies,
            dietary_preferences: payload.dietary_preferences,
        }
    }
}
