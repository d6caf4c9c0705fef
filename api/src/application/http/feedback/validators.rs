use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitFeedbackValidator {
    #[validate(length(min = 1, max = 2000, message = "feedback text is required"))]
    pub text: String,
}
