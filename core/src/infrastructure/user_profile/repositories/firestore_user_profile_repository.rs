use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        user_profile::{entities::UserProfile, ports::UserProfileRepository},
    },
    infrastructure::{
        firestore::{FirestoreStore, USERS},
        user_profile::mappers::{profile_from_fields, profile_to_fields},
    },
};

impl UserProfileRepository for FirestoreStore {
    async fn get_by_user_id(&self, user_id: &str) -> Result<Option<UserProfile>, CoreError> {
        self.client
            .get_document(USERS, user_id)
            .await?
            .map(|fields| profile_from_fields(&fields))
            .transpose()
    }

    async fn upsert(&self, profile: UserProfile) -> Result<UserProfile, CoreError> {
        self.client
            .set_document(USERS, &profile.user_id, &profile_to_fields(&profile))
            .await?;
        Ok(profile)
    }
}
