use crate::domain::conversation::entities::MessageType;

pub const DEFAULT_HISTORY_LIMIT: u64 = 50;
pub const MAX_HISTORY_LIMIT: u64 = 200;

#[derive(Debug, Clone)]
pub struct LogMessageInput {
    pub agent_name: String,
    pub message: String,
    pub message_type: MessageType,
}

pub fn clamp_history_limit(limit: Option<u64>) -> u64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}
