pub mod get_conversations;
pub mod log_message;
