use chrono::NaiveDate;

use crate::{
    domain::{
        common::{daily_document_id, entities::app_errors::CoreError},
        feedback::{entities::Feedback, ports::FeedbackRepository},
    },
    infrastructure::{
        feedback::mappers::{feedback_from_fields, feedback_to_fields},
        firestore::{FEEDBACK, FirestoreStore, codec::Value},
    },
};

impl FeedbackRepository for FirestoreStore {
    async fn get(&self, user_id: &str, plan_date: NaiveDate) -> Result<Option<Feedback>, CoreError> {
        self.client
            .get_document(FEEDBACK, &daily_document_id(user_id, plan_date))
            .await?
            .map(|fields| feedback_from_fields(&fields))
            .transpose()
    }

    async fn create(&self, feedback: Feedback) -> Result<Feedback, CoreError> {
        self.client
            .create_document(FEEDBACK, &feedback.document_id(), &feedback_to_fields(&feedback))
            .await?;
        Ok(feedback)
    }

    async fn list_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Feedback>, CoreError> {
        let mut items = self
            .client
            .query_equal(FEEDBACK, "user_id", Value::StringValue(user_id.to_string()))
            .await?
            .iter()
            .map(feedback_from_fields)
            .collect::<Result<Vec<_>, _>>()?;

        items.retain(|item| item.plan_date >= start && item.plan_date <= end);
        items.sort_by_key(|item| item.plan_date);
        Ok(items)
    }
}
