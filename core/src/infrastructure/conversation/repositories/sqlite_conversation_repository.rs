use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        conversation::{entities::ConversationEntry, ports::ConversationRepository},
    },
    entity::conversations::{ActiveModel, Column, Entity},
    infrastructure::local::{LocalStore, db_error},
};

impl ConversationRepository for LocalStore {
    async fn append(&self, entry: ConversationEntry) -> Result<ConversationEntry, CoreError> {
        Entity::insert(ActiveModel::from(&entry))
            .exec(&self.db)
            .await
            .map_err(db_error("append conversation entry"))?;

        Ok(entry)
    }

    async fn list_recent(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<ConversationEntry>, CoreError> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::Timestamp)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("list conversation entries"))?
            .into_iter()
            .map(ConversationEntry::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::entities::MessageType;

    #[tokio::test]
    async fn lists_newest_first_per_user() {
        let store = LocalStore::in_memory().await.unwrap();
        for (user, message) in [("u-1", "first"), ("u-2", "other"), ("u-1", "second")] {
            store
                .append(ConversationEntry::new(
                    user.to_string(),
                    "user".to_string(),
                    message.to_string(),
                    MessageType::UserInput,
                ))
                .await
                .unwrap();
        }

        let entries = store.list_recent("u-1", 10).await.unwrap();
        let messages: Vec<_> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);

        let latest = store.list_recent("u-1", 1).await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].message, "second");
        assert!(store.list_recent("u-3", 5).await.unwrap().is_empty());
    }
}
