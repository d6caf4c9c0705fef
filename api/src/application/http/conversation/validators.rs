use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use vitaplan_core::domain::conversation::{
    entities::MessageType, value_objects::LogMessageInput,
};

fn default_agent_name() -> String {
    "user".to_string()
}

fn default_message_type() -> MessageType {
    MessageType::UserInput
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LogMessageValidator {
    #[validate(length(min = 1, max = 64, message = "agent_name must be 1-64 characters"))]
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    #[validate(length(min = 1, max = 4000, message = "message is required"))]
    pub message: String,

    #[serde(default = "default_message_type")]
    pub message_type: MessageType,
}

impl From<LogMessageValidator> for LogMessageInput {
    fn from(payload: LogMessageValidator) -> Self {
        Self {
            agent_name: payload.agent_name,
            message: payload.message,
            message_type: payload.message_type,
        }
    }
}
