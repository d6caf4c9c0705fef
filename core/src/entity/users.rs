use sea_orm::entity::prelude::*;

/// List columns hold JSON-encoded string arrays.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub bmi: Option<f64>,
    #[sea_orm(column_type = "Text")]
    pub health_conditions: String,
    #[sea_orm(column_type = "Text")]
    pub allergies: String,
    #[sea_orm(column_type = "Text")]
    pub dietary_preferences: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
