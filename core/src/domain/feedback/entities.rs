use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::{daily_document_id, generate_timestamp},
    feedback::value_objects::{FeedbackAnalysis, Sentiment},
};

/// Free-text comment on one plan with its derived score. One per plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub user_id: String,
    pub plan_date: NaiveDate,
    pub text: String,
    pub adherence_score: f64,
    pub sentiment: Sentiment,
    pub suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(user_id: String, plan_date: NaiveDate, text: String, analysis: &FeedbackAnalysis) -> Self {
        let (now, _) = generate_timestamp();

        Self {
            user_id,
            plan_date,
            text,
            adherence_score: analysis.adherence_score,
            sentiment: analysis.sentiment,
            suggestions: analysis.suggestions.clone(),
            created_at: now,
        }
    }

    pub fn document_id(&self) -> String {
        daily_document_id(&self.user_id, self.plan_date)
    }
}
