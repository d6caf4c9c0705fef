pub mod generate_plan;
pub mod get_plan;
pub mod get_plan_calendar;
pub mod get_plan_history;
pub mod get_todays_plan;
pub mod substitute_meals;
