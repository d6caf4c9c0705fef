pub mod firestore_diet_plan_repository;
pub mod sqlite_diet_plan_repository;
