use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::generate_timestamp;

pub const PLANNER_AGENT: &str = "diet_planner";
pub const FEEDBACK_AGENT: &str = "feedback_analyzer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    UserInput,
    AgentResponse,
    System,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::UserInput => "user_input",
            MessageType::AgentResponse => "agent_response",
            MessageType::System => "system",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user_input" => Ok(MessageType::UserInput),
            "agent_response" => Ok(MessageType::AgentResponse),
            "system" => Ok(MessageType::System),
            other => Err(format!("unknown message type `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConversationEntry {
    pub id: String,
    pub user_id: String,
    pub agent_name: String,
    pub message: String,
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
}

impl ConversationEntry {
    pub fn new(
        user_id: String,
        agent_name: String,
        message: String,
        message_type: MessageType,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: uuid::Uuid::new_v7(timestamp).to_string(),
            user_id,
            agent_name,
            message,
            message_type,
            timestamp: now,
        }
    }

    pub fn agent_response(user_id: &str, agent_name: &str, message: String) -> Self {
        Self::new(
            user_id.to_string(),
            agent_name.to_string(),
            message,
            MessageType::AgentResponse,
        )
    }
}
