pub mod common;
pub mod conversation;
pub mod daily_status;
pub mod diet_plan;
pub mod feedback;
pub mod health;
pub mod meal_catalog;
pub mod recommendation;
pub mod user_profile;
