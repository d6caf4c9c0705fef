use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{
    common::entities::app_errors::CoreError, daily_status::value_objects::DailyOverview,
};

pub trait DailyStatusService: Send + Sync {
    fn daily_overview(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<DailyOverview, CoreError>> + Send;
}
