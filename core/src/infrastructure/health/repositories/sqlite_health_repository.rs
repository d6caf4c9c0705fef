use std::time::Instant;

use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        health::{entities::StorageHealthStatus, ports::HealthCheckRepository},
    },
    infrastructure::local::LocalStore,
};

impl HealthCheckRepository for LocalStore {
    async fn health(&self) -> Result<u64, CoreError> {
        let started = Instant::now();
        self.db.ping().await.map_err(|e| {
            error!("Local database ping failed: {}", e);
            CoreError::InternalServerError
        })?;
        Ok(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX))
    }

    async fn readiness(&self) -> Result<StorageHealthStatus, CoreError> {
        let (reachable, response_time_ms) = match self.health().await {
            Ok(ms) => (true, ms),
            Err(_) => (false, 0),
        };

        Ok(StorageHealthStatus {
            backend: "local".to_string(),
            mode: "strict".to_string(),
            reachable,
            response_time_ms,
            fallback_reachable: None,
        })
    }
}
