use chrono::NaiveDate;

use crate::{
    domain::{
        common::{daily_document_id, entities::app_errors::CoreError},
        diet_plan::{entities::DietPlan, ports::DietPlanRepository},
    },
    infrastructure::{
        diet_plan::mappers::{plan_from_fields, plan_to_fields},
        firestore::{DIET_PLANS, FirestoreStore, codec::Value},
    },
};

impl FirestoreStore {
    async fn plans_of(&self, user_id: &str) -> Result<Vec<DietPlan>, CoreError> {
        self.client
            .query_equal(DIET_PLANS, "user_id", Value::StringValue(user_id.to_string()))
            .await?
            .iter()
            .map(plan_from_fields)
            .collect()
    }
}

impl DietPlanRepository for FirestoreStore {
    async fn get(&self, user_id: &str, plan_date: NaiveDate) -> Result<Option<DietPlan>, CoreError> {
        self.client
            .get_document(DIET_PLANS, &daily_document_id(user_id, plan_date))
            .await?
            .map(|fields| plan_from_fields(&fields))
            .transpose()
    }

    async fn save(&self, plan: DietPlan) -> Result<DietPlan, CoreError> {
        self.client
            .set_document(DIET_PLANS, &plan.document_id(), &plan_to_fields(&plan))
            .await?;
        Ok(plan)
    }

    async fn list_recent(&self, user_id: &str, limit: u64) -> Result<Vec<DietPlan>, CoreError> {
        self.client
            .query_latest(
                DIET_PLANS,
                "user_id",
                Value::StringValue(user_id.to_string()),
                "plan_date",
                limit,
            )
            .await?
            .iter()
            .map(plan_from_fields)
            .collect()
    }

    async fn list_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DietPlan>, CoreError> {
        let mut plans: Vec<DietPlan> = self
            .plans_of(user_id)
            .await?
            .into_iter()
            .filter(|plan| plan.plan_date >= start && plan.plan_date <= end)
            .collect();
        plans.sort_by_key(|plan| plan.plan_date);
        Ok(plans)
    }
}
