pub mod conversation;
pub mod daily_status;
pub mod diet_plan;
pub mod feedback;
pub mod health;
pub mod recommendation;
pub mod server;
pub mod user_profile;
