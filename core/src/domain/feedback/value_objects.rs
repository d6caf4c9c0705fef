use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    feedback::{entities::Feedback, scorer::SIMPLIFY_THRESHOLD},
    recommendation::value_objects::PlanStrategy,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn from_score(score: f64) -> Self {
        if score > 0.6 {
            Sentiment::Positive
        } else if score < 0.4 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            other => Err(format!("unknown sentiment `{other}`")),
        }
    }
}

/// The only lever feedback has on the next plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanAdjustment {
    Simplify,
    AddVariety,
}

impl PlanAdjustment {
    pub fn from_score(score: f64) -> Self {
        if score < SIMPLIFY_THRESHOLD {
            PlanAdjustment::Simplify
        } else {
            PlanAdjustment::AddVariety
        }
    }
}

impl From<PlanAdjustment> for PlanStrategy {
    fn from(adjustment: PlanAdjustment) -> Self {
        match adjustment {
            PlanAdjustment::Simplify => PlanStrategy::Simplify,
            PlanAdjustment::AddVariety => PlanStrategy::AddVariety,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackAnalysis {
    pub adherence_score: f64,
    pub sentiment: Sentiment,
    pub positive_terms: Vec<String>,
    pub negative_terms: Vec<String>,
    pub suggestions: Vec<String>,
    pub adjustment: PlanAdjustment,
}

#[derive(Debug, Clone)]
pub struct SubmitFeedbackInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FeedbackOutcome {
    pub feedback: Feedback,
    pub analysis: FeedbackAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FeedbackSummary {
    pub days: u32,
    pub plans: usize,
    pub plans_with_feedback: usize,
    pub average_adherence: Option<f64>,
    pub dominant_adjustment: Option<PlanAdjustment>,
}
