use sea_orm::ActiveValue::Set;

use crate::{
    domain::{common::entities::app_errors::CoreError, user_profile::entities::UserProfile},
    entity::users,
    infrastructure::{
        firestore::codec::Fields,
        local::{decode_list, encode_list},
    },
};

impl TryFrom<users::Model> for UserProfile {
    type Error = CoreError;

    fn try_from(model: users::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: model.user_id,
            name: model.name,
            age: u32::try_from(model.age).unwrap_or_default(),
            gender: model.gender,
            height_cm: model.height_cm,
            weight_kg: model.weight_kg,
            bmi: model.bmi,
            health_conditions: decode_list(&model.health_conditions)?,
            allergies: decode_list(&model.allergies)?,
            dietary_preferences: decode_list(&model.dietary_preferences)?,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        })
    }
}

impl From<&UserProfile> for users::ActiveModel {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user_id: Set(profile.user_id.clone()),
            name: Set(profile.name.clone()),
            age: Set(i32::try_from(profile.age).unwrap_or(i32::MAX)),
            gender: Set(profile.gender.clone()),
            height_cm: Set(profile.height_cm),
            weight_kg: Set(profile.weight_kg),
            bmi: Set(profile.bmi),
            health_conditions: Set(encode_list(&profile.health_conditions)),
            allergies: Set(encode_list(&profile.allergies)),
            dietary_preferences: Set(encode_list(&profile.dietary_preferences)),
            created_at: Set(profile.created_at.fixed_offset()),
            updated_at: Set(profile.updated_at.fixed_offset()),
        }
    }
}

pub fn profile_to_fields(profile: &UserProfile) -> Fields {
    Fields::new()
        .string("user_id", &profile.user_id)
        .string("name", &profile.name)
        .integer("age", i64::from(profile.age))
        .string("gender", &profile.gender)
        .opt_double("height_cm", profile.height_cm)
        .opt_double("weight_kg", profile.weight_kg)
        .opt_double("bmi", profile.bmi)
        .strings("health_conditions", &profile.health_conditions)
        .strings("allergies", &profile.allergies)
        .strings("dietary_preferences", &profile.dietary_preferences)
        .timestamp("created_at", profile.created_at)
        .timestamp("updated_at", profile.updated_at)
}

pub fn profile_from_fields(fields: &Fields) -> Result<UserProfile, CoreError> {
    Ok(UserProfile {
        user_id: fields.get_string("user_id")?,
        name: fields.get_string("name")?,
        age: u32::try_from(fields.get_i64("age")?).unwrap_or_default(),
        gender: fields.get_opt_string("gender")?.unwrap_or_default(),
        height_cm: fields.get_opt_f64("height_cm")?,
        weight_kg: fields.get_opt_f64("weight_kg")?,
        bmi: fields.get_opt_f64("bmi")?,
        health_conditions: fields.get_strings("health_conditions")?,
        allergies: fields.get_strings("allergies")?,
        dietary_preferences: fields.get_strings("dietary_preferences")?,
        created_at: fields.get_timestamp("created_at")?,
        updated_at: fields.get_timestamp("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user_profile::value_objects::UpsertProfileInput;

    #[test]
    fn profile_survives_document_encoding() {
        let profile = UserProfile::new(
            "u-9".to_string(),
            UpsertProfileInput {
                name: "Kiran".to_string(),
                age: Some(52),
                gender: None,
                height_cm: Some(170.0),
                weight_kg: None,
                health_conditions: vec!["heart disease".to_string()],
                allergies: vec![],
                dietary_preferences: vec!["vegan".to_string()],
            },
        );

        let fields = profile_to_fields(&profile);
        let json = serde_json::to_string(&fields).unwrap();
        let decoded: Fields = serde_json::from_str(&json).unwrap();

        assert_eq!(profile_from_fields(&decoded).unwrap(), profile);
    }
}
