pub mod firestore_feedback_repository;
pub mod sqlite_feedback_repository;
