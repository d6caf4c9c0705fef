use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{
    common::entities::app_errors::CoreError,
    diet_plan::{
        entities::DietPlan,
        value_objects::{GeneratePlanInput, PlanCalendar, SubstitutionInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait DietPlanRepository: Send + Sync {
    fn get(
        &self,
        user_id: &str,
        plan_date: NaiveDate,
    ) -> impl Future<Output = Result<Option<DietPlan>, CoreError>> + Send;

    /// Inserts or replaces the plan stored under the same user and date.
    fn save(&self, plan: DietPlan) -> impl Future<Output = Result<DietPlan, CoreError>> + Send;

    /// Newest plan dates first.
    fn list_recent(
        &self,
        user_id: &str,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<DietPlan>, CoreError>> + Send;

    /// Plans with `start <= plan_date <= end`, oldest first.
    fn list_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<DietPlan>, CoreError>> + Send;
}

pub trait DietPlanService: Send + Sync {
    fn generate_plan(
        &self,
        user_id: &str,
        input: GeneratePlanInput,
    ) -> impl Future<Output = Result<DietPlan, CoreError>> + Send;

    fn todays_plan(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<DietPlan, CoreError>> + Send;

    fn plan_by_date(
        &self,
        user_id: &str,
        plan_date: NaiveDate,
    ) -> impl Future<Output = Result<DietPlan, CoreError>> + Send;

    fn plan_history(
        &self,
        user_id: &str,
        limit: Option<u64>,
    ) -> impl Future<Output = Result<Vec<DietPlan>, CoreError>> + Send;

    fn plan_calendar(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<PlanCalendar, CoreError>> + Send;

    fn substitute_meals(
        &self,
        user_id: &str,
        plan_date: NaiveDate,
        input: SubstitutionInput,
    ) -> impl Future<Output = Result<DietPlan, CoreError>> + Send;
}
