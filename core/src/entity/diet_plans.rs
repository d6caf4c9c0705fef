use sea_orm::entity::prelude::*;

/// One row per user and day, keyed `"{user_id}_{plan_date}"`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "diet_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(indexed)]
    pub user_id: String,
    pub plan_date: Date,
    #[sea_orm(column_type = "Text")]
    pub meal_plan: String,
    pub condition: String,
    pub strategy: String,
    #[sea_orm(column_type = "Text")]
    pub unfilled_slots: String,
    #[sea_orm(column_type = "Text")]
    pub unavailable_items: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback_text: Option<String>,
    pub adherence_score: Option<f64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
