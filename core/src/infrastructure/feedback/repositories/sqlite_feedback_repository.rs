use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, SqlErr};
use tracing::error;

use crate::{
    domain::{
        common::{daily_document_id, entities::app_errors::CoreError},
        feedback::{entities::Feedback, ports::FeedbackRepository},
    },
    entity::feedback::{ActiveModel, Column, Entity},
    infrastructure::local::{LocalStore, db_error},
};

impl FeedbackRepository for LocalStore {
    async fn get(&self, user_id: &str, plan_date: NaiveDate) -> Result<Option<Feedback>, CoreError> {
        Entity::find_by_id(daily_document_id(user_id, plan_date))
            .one(&self.db)
            .await
            .map_err(db_error("get feedback"))?
            .map(Feedback::try_from)
            .transpose()
    }

    async fn create(&self, feedback: Feedback) -> Result<Feedback, CoreError> {
        Entity::insert(ActiveModel::from(&feedback))
            .exec(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => CoreError::AlreadyExists,
                _ => {
                    error!("Failed to create feedback: {}", e);
                    CoreError::InternalServerError
                }
            })?;

        Ok(feedback)
    }

    async fn list_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Feedback>, CoreError> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::PlanDate.between(start, end))
            .order_by_asc(Column::PlanDate)
            .all(&self.db)
            .await
            .map_err(db_error("list feedback"))?
            .into_iter()
            .map(Feedback::try_from)
            .collect()
    }
}
