use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recommendation::value_objects::{RecommendInput, Recommendation},
};

pub trait RecommendationService: Send + Sync {
    /// Engine result for one slot using the caller's stored profile.
    fn recommend_for_user(
        &self,
        user_id: &str,
        input: RecommendInput,
    ) -> impl Future<Output = Result<Recommendation, CoreError>> + Send;
}
