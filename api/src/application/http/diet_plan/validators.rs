use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct GeneratePlanValidator {
    /// Defaults to today. Past dates are rejected.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Replace an existing plan for the date instead of returning it.
    #[serde(default)]
    pub regenerate: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubstitutionValidator {
    #[validate(length(min = 1, max = 20, message = "list 1-20 unavailable items"))]
    pub unavailable_items: Vec<String>,
}
