use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema,
};
use tracing::{error, info};

use crate::{
    domain::common::entities::app_errors::CoreError,
    entity::{conversations, diet_plans, feedback, users},
};

/// SQLite-backed store. Tables are created on connect when absent.
#[derive(Debug, Clone)]
pub struct LocalStore {
    pub db: DatabaseConnection,
}

impl LocalStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn connect(database_url: &str) -> Result<Self, CoreError> {
        let mut options = ConnectOptions::new(database_url.to_string());
        options
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);
        if database_url.contains(":memory:") {
            // Every pooled connection would otherwise get its own empty database.
            options.max_connections(1).min_connections(1);
        } else {
            options.max_connections(5);
        }

        let db = Database::connect(options).await.map_err(|e| {
            error!("Failed to open local database {}: {}", database_url, e);
            CoreError::Configuration(format!("cannot open local database `{database_url}`: {e}"))
        })?;

        let store = Self::new(db);
        store.ensure_schema().await?;
        info!(database_url, "local store ready");
        Ok(store)
    }

    pub async fn in_memory() -> Result<Self, CoreError> {
        Self::connect("sqlite::memory:").await
    }

    async fn ensure_schema(&self) -> Result<(), CoreError> {
        self.create_table(users::Entity).await?;
        self.create_table(conversations::Entity).await?;
        self.create_table(diet_plans::Entity).await?;
        self.create_table(feedback::Entity).await?;
        Ok(())
    }

    async fn create_table<E: EntityTrait>(&self, entity: E) -> Result<(), CoreError> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);

        let mut table = schema.create_table_from_entity(entity);
        table.if_not_exists();
        self.db.execute(backend.build(&table)).await.map_err(|e| {
            error!("Failed to create table {}: {}", entity.table_name(), e);
            CoreError::InternalServerError
        })?;

        for mut index in schema.create_index_from_entity(entity) {
            index.if_not_exists();
            self.db.execute(backend.build(&index)).await.map_err(|e| {
                error!("Failed to create index on {}: {}", entity.table_name(), e);
                CoreError::InternalServerError
            })?;
        }
        Ok(())
    }
}

/// Logs a database failure and hides it behind `InternalServerError`.
pub(crate) fn db_error(action: &str) -> impl FnOnce(sea_orm::DbErr) -> CoreError + '_ {
    move |e| {
        error!("Failed to {}: {}", action, e);
        CoreError::InternalServerError
    }
}

pub(crate) fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_list(raw: &str) -> Result<Vec<String>, CoreError> {
    serde_json::from_str(raw).map_err(|e| {
        error!("Failed to decode stored list {:?}: {}", raw, e);
        CoreError::InternalServerError
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let store = LocalStore::in_memory().await.unwrap();
        store.ensure_schema().await.unwrap();
    }

    #[test]
    fn list_codec_round_trips_json_text() {
        let encoded = encode_list(&["nuts".to_string(), "soy".to_string()]);
        assert_eq!(encoded, r#"["nuts","soy"]"#);
        assert_eq!(decode_list(&encoded).unwrap(), vec!["nuts", "soy"]);
        assert!(decode_list("not json").is_err());
    }
}
