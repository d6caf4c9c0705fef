pub mod conversation;
pub mod diet_plan;
pub mod feedback;
pub mod firestore;
pub mod health;
pub mod local;
pub mod storage;
pub mod user_profile;
