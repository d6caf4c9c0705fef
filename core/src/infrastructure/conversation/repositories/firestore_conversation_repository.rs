use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        conversation::{entities::ConversationEntry, ports::ConversationRepository},
    },
    infrastructure::{
        conversation::mappers::{entry_from_fields, entry_to_fields},
        firestore::{CONVERSATIONS, FirestoreStore, codec::Value},
    },
};

impl ConversationRepository for FirestoreStore {
    async fn append(&self, entry: ConversationEntry) -> Result<ConversationEntry, CoreError> {
        self.client
            .set_document(CONVERSATIONS, &entry.id, &entry_to_fields(&entry))
            .await?;
        Ok(entry)
    }

    async fn list_recent(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<ConversationEntry>, CoreError> {
        let mut entries = self
            .client
            .query_latest(
                CONVERSATIONS,
                "user_id",
                Value::StringValue(user_id.to_string()),
                "timestamp",
                limit,
            )
            .await?
            .iter()
            .map(entry_from_fields)
            .collect::<Result<Vec<_>, _>>()?;

        // Entries sharing a timestamp come back in index order; the id breaks the tie.
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
        Ok(entries)
    }
}
