use sea_orm::ActiveValue::Set;
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        conversation::entities::{ConversationEntry, MessageType},
    },
    entity::conversations,
    infrastructure::firestore::codec::Fields,
};

fn parse_message_type(raw: &str) -> Result<MessageType, CoreError> {
    raw.parse().map_err(|e| {
        error!("Stored conversation entry has {}", e);
        CoreError::InternalServerError
    })
}

impl TryFrom<conversations::Model> for ConversationEntry {
    type Error = CoreError;

    fn try_from(model: conversations::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            message_type: parse_message_type(&model.message_type)?,
            id: model.id,
            user_id: model.user_id,
            agent_name: model.agent_name,
            message: model.message,
            timestamp: model.timestamp.to_utc(),
        })
    }
}

impl From<&ConversationEntry> for conversations::ActiveModel {
    fn from(entry: &ConversationEntry) -> Self {
        Self {
            id: Set(entry.id.clone()),
            user_id: Set(entry.user_id.clone()),
            agent_name: Set(entry.agent_name.clone()),
            message: Set(entry.message.clone()),
            message_type: Set(entry.message_type.as_str().to_string()),
            timestamp: Set(entry.timestamp.fixed_offset()),
        }
    }
}

pub fn entry_to_fields(entry: &ConversationEntry) -> Fields {
    Fields::new()
        .string("id", &entry.id)
        .string("user_id", &entry.user_id)
        .string("agent_name", &entry.agent_name)
        .string("message", &entry.message)
        .string("message_type", entry.message_type.as_str())
        .timestamp("timestamp", entry.timestamp)
}

pub fn entry_from_fields(fields: &Fields) -> Result<ConversationEntry, CoreError> {
    Ok(ConversationEntry {
        id: fields.get_string("id")?,
        user_id: fields.get_string("user_id")?,
        agent_name: fields.get_string("agent_name")?,
        message: fields.get_string("message")?,
        message_type: parse_message_type(&fields.get_string("message_type")?)?,
        timestamp: fields.get_timestamp("timestamp")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_survives_document_encoding() {
        let entry = ConversationEntry::new(
            "u-9".to_string(),
            "meal_planner".to_string(),
            "Swap lunch for something lighter".to_string(),
            MessageType::UserInput,
        );

        let fields = entry_to_fields(&entry);
        let json = serde_json::to_string(&fields).unwrap();
        let decoded: Fields = serde_json::from_str(&json).unwrap();

        assert_eq!(entry_from_fields(&decoded).unwrap(), entry);
    }

    #[test]
    fn unknown_message_type_is_rejected() {
        let entry = ConversationEntry::agent_response("u-9", "meal_planner", "ok".to_string());
        let fields = entry_to_fields(&entry).string("message_type", "broadcast");

        assert_eq!(
            entry_from_fields(&fields),
            Err(CoreError::InternalServerError)
        );
    }
}
