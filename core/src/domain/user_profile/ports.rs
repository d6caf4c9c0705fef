use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    user_profile::{entities::UserProfile, value_objects::UpsertProfileInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait UserProfileRepository: Send + Sync {
    fn get_by_user_id(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<UserProfile>, CoreError>> + Send;

    /// Inserts the profile or replaces the stored one with the same `user_id`.
    fn upsert(
        &self,
        profile: UserProfile,
    ) -> impl Future<Output = Result<UserProfile, CoreError>> + Send;
}

pub trait UserProfileService: Send + Sync {
    fn get_profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<UserProfile, CoreError>> + Send;

    fn upsert_profile(
        &self,
        user_id: &str,
        input: UpsertProfileInput,
    ) -> impl Future<Output = Result<UserProfile, CoreError>> + Send;
}
