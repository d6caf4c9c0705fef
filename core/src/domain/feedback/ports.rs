use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{
    common::entities::app_errors::CoreError,
    feedback::{
        entities::Feedback,
        value_objects::{FeedbackOutcome, FeedbackSummary, SubmitFeedbackInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait FeedbackRepository: Send + Sync {
    fn get(
        &self,
        user_id: &str,
        plan_date: NaiveDate,
    ) -> impl Future<Output = Result<Option<Feedback>, CoreError>> + Send;

    /// Stores new feedback; `AlreadyExists` when the plan already has some.
    fn create(
        &self,
        feedback: Feedback,
    ) -> impl Future<Output = Result<Feedback, CoreError>> + Send;

    /// Feedback with `start <= plan_date <= end`, oldest first.
    fn list_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Feedback>, CoreError>> + Send;
}

pub trait FeedbackService: Send + Sync {
    fn submit_feedback(
        &self,
        user_id: &str,
        plan_date: NaiveDate,
        input: SubmitFeedbackInput,
    ) -> impl Future<Output = Result<FeedbackOutcome, CoreError>> + Send;

    fn get_feedback(
        &self,
        user_id: &str,
        plan_date: NaiveDate,
    ) -> impl Future<Output = Result<Feedback, CoreError>> + Send;

    fn feedback_summary(
        &self,
        user_id: &str,
        days: u32,
    ) -> impl Future<Output = Result<FeedbackSummary, CoreError>> + Send;
}
