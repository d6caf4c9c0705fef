pub mod firestore_health_repository;
pub mod sqlite_health_repository;
