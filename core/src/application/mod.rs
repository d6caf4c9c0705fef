use tracing::info;

use crate::{
    domain::common::{VitaplanConfig, entities::app_errors::CoreError, services::Service},
    domain::recommendation::engine::RecommendationEngine,
    infrastructure::storage::Storage,
};

pub type VitaplanService = Service<Storage, Storage, Storage, Storage, Storage>;

/// Builds the application service over the storage backend selected by `config`.
pub async fn create_service(config: VitaplanConfig) -> Result<VitaplanService, CoreError> {
    let storage = Storage::from_config(&config.storage).await?;
    let engine = RecommendationEngine::builtin(config.planner.meals_per_slot);
    info!(
        backend = storage.backend_name(),
        meals_per_slot = engine.meals_per_slot(),
        "service ready"
    );

    Ok(service_with_storage(storage, engine))
}

pub fn service_with_storage(storage: Storage, engine: RecommendationEngine) -> VitaplanService {
    Service::new(
        storage.clone(),
        storage.clone(),
        storage.clone(),
        storage.clone(),
        storage,
        engine,
    )
}
