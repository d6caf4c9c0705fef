use sea_orm::{EntityTrait, sea_query::OnConflict};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        user_profile::{entities::UserProfile, ports::UserProfileRepository},
    },
    entity::users::{ActiveModel, Column, Entity},
    infrastructure::local::{LocalStore, db_error},
};

impl UserProfileRepository for LocalStore {
    async fn get_by_user_id(&self, user_id: &str) -> Result<Option<UserProfile>, CoreError> {
        let model = Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(db_error("get user profile"))?;

        model.map(UserProfile::try_from).transpose()
    }

    async fn upsert(&self, profile: UserProfile) -> Result<UserProfile, CoreError> {
        let active_model = ActiveModel::from(&profile);

        Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(Column::UserId)
                    .update_columns([
                        Column::Name,
                        Column::Age,
                        Column::Gender,
                        Column::HeightCm,
                        Column::WeightKg,
                        Column::Bmi,
                        Column::HealthConditions,
                        Column::Allergies,
                        Column::DietaryPreferences,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_error("upsert user profile"))?;

        Ok(profile)
    }
}
