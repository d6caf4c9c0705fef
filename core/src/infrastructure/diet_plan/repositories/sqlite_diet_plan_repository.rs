use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::OnConflict};

use crate::{
    domain::{
        common::{daily_document_id, entities::app_errors::CoreError},
        diet_plan::{entities::DietPlan, ports::DietPlanRepository},
    },
    entity::diet_plans::{ActiveModel, Column, Entity},
    infrastructure::local::{LocalStore, db_error},
};

impl DietPlanRepository for LocalStore {
    async fn get(&self, user_id: &str, plan_date: NaiveDate) -> Result<Option<DietPlan>, CoreError> {
        Entity::find_by_id(daily_document_id(user_id, plan_date))
            .one(&self.db)
            .await
            .map_err(db_error("get diet plan"))?
            .map(DietPlan::try_from)
            .transpose()
    }

    async fn save(&self, plan: DietPlan) -> Result<DietPlan, CoreError> {
        Entity::insert(ActiveModel::from(&plan))
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::MealPlan,
                        Column::Condition,
                        Column::Strategy,
                        Column::UnfilledSlots,
                        Column::UnavailableItems,
                        Column::FeedbackText,
                        Column::AdherenceScore,
                        Column::CreatedAt,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_error("save diet plan"))?;

        Ok(plan)
    }

    async fn list_recent(&self, user_id: &str, limit: u64) -> Result<Vec<DietPlan>, CoreError> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::PlanDate)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("list diet plans"))?
            .into_iter()
            .map(DietPlan::try_from)
            .collect()
    }

    async fn list_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DietPlan>, CoreError> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::PlanDate.between(start, end))
            .order_by_asc(Column::PlanDate)
            .all(&self.db)
            .await
            .map_err(db_error("list diet plans in range"))?
            .into_iter()
            .map(DietPlan::try_from)
            .collect()
    }
}
