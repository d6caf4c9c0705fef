use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        health::{entities::StorageHealthStatus, ports::HealthCheckRepository},
    },
    infrastructure::firestore::{FirestoreStore, USERS},
};

impl HealthCheckRepository for FirestoreStore {
    async fn health(&self) -> Result<u64, CoreError> {
        self.client.ping(USERS).await
    }

    async fn readiness(&self) -> Result<StorageHealthStatus, CoreError> {
        let (reachable, response_time_ms) = match self.health().await {
            Ok(ms) => (true, ms),
            Err(_) => (false, 0),
        };

        Ok(StorageHealthStatus {
            backend: "firestore".to_string(),
            mode: "strict".to_string(),
            reachable,
            response_time_ms,
            fallback_reachable: None,
        })
    }
}
