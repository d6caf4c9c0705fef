pub mod firestore_user_profile_repository;
pub mod sqlite_user_profile_repository;
