pub mod firestore_conversation_repository;
pub mod sqlite_conversation_repository;
