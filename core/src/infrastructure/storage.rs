use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    domain::{
        common::{StorageBackendKind, StorageConfig, StorageMode, entities::app_errors::CoreError},
        conversation::{entities::ConversationEntry, ports::ConversationRepository},
        diet_plan::{entities::DietPlan, ports::DietPlanRepository},
        feedback::{entities::Feedback, ports::FeedbackRepository},
        health::{entities::StorageHealthStatus, ports::HealthCheckRepository},
        user_profile::{entities::UserProfile, ports::UserProfileRepository},
    },
    infrastructure::{firestore::FirestoreStore, local::LocalStore},
};

/// Backend chosen once at startup. There is no switching afterwards.
#[derive(Debug, Clone)]
pub enum Storage {
    Local(LocalStore),
    Remote(FirestoreStore),
    /// Remote first; the local store answers when the remote one fails transiently.
    Permissive {
        remote: FirestoreStore,
        local: LocalStore,
    },
}

impl Storage {
    /// Selects the backend described by `config`.
    ///
    /// A misconfigured remote backend is fatal in strict mode. In permissive
    /// mode it is logged and the local store is used instead.
    pub async fn from_config(config: &StorageConfig) -> Result<Self, CoreError> {
        match config.backend {
            StorageBackendKind::Local => {
                let local = LocalStore::connect(&config.database_url).await?;
                info!(backend = "local", "storage backend selected");
                Ok(Storage::Local(local))
            }
            StorageBackendKind::Firestore => match config.mode {
                StorageMode::Strict => {
                    let remote = FirestoreStore::from_config(&config.firestore)?;
                    info!(backend = "firestore", mode = "strict", "storage backend selected");
                    Ok(Storage::Remote(remote))
                }
                StorageMode::Permissive => {
                    let local = LocalStore::connect(&config.database_url).await?;
                    match FirestoreStore::from_config(&config.firestore) {
                        Ok(remote) => {
                            info!(
                                backend = "firestore",
                                mode = "permissive",
                                "storage backend selected"
                            );
                            Ok(Storage::Permissive { remote, local })
                        }
                        Err(e) => {
                            warn!(error = %e, "Firestore unavailable, using the local store");
                            Ok(Storage::Local(local))
                        }
                    }
                }
            },
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Storage::Local(_) => "local",
            Storage::Remote(_) | Storage::Permissive { .. } => "firestore",
        }
    }
}

/// Runs `$call` against the active store. In permissive mode a transient
/// remote failure is logged and `$call` is repeated against the local store.
macro_rules! dispatch {
    ($storage:expr, $operation:literal, |$store:ident| $call:expr) => {
        match $storage {
            Storage::Local($store) => $call.await,
            Storage::Remote($store) => $call.await,
            Storage::Permissive { remote, local } => {
                let result = {
                    let $store = remote;
                    $call.await
                };
                match result {
                    Err(e) if e.is_transient() => {
                        warn!(
                            operation = $operation,
                            error = %e,
                            "remote store failed, falling back to local store"
                        );
                        let $store = local;
                        $call.await
                    }
                    other => other,
                }
            }
        }
    };
}

impl UserProfileRepository for Storage {
    async fn get_by_user_id(&self, user_id: &str) -> Result<Option<UserProfile>, CoreError> {
        dispatch!(self, "get_user_profile", |store| store.get_by_user_id(user_id))
    }

    async fn upsert(&self, profile: UserProfile) -> Result<UserProfile, CoreError> {
        dispatch!(self, "upsert_user_profile", |store| store.upsert(profile.clone()))
    }
}

impl ConversationRepository for Storage {
    async fn append(&self, entry: ConversationEntry) -> Result<ConversationEntry, CoreError> {
        dispatch!(self, "append_conversation", |store| store.append(entry.clone()))
    }

    async fn list_recent(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<ConversationEntry>, CoreError> {
        dispatch!(self, "list_conversations", |store| ConversationRepository::list_recent(
            store, user_id, limit
        ))
    }
}

impl DietPlanRepository for Storage {
    async fn get(&self, user_id: &str, plan_date: NaiveDate) -> Result<Option<DietPlan>, CoreError> {
        dispatch!(self, "get_diet_plan", |store| DietPlanRepository::get(
            store, user_id, plan_date
        ))
    }

    async fn save(&self, plan: DietPlan) -> Result<DietPlan, CoreError> {
        dispatch!(self, "save_diet_plan", |store| store.save(plan.clone()))
    }

    async fn list_recent(&self, user_id: &str, limit: u64) -> Result<Vec<DietPlan>, CoreError> {
        dispatch!(self, "list_diet_plans", |store| DietPlanRepository::list_recent(
            store, user_id, limit
        ))
    }

    async fn list_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DietPlan>, CoreError> {
        dispatch!(self, "list_diet_plans_between", |store| {
            DietPlanRepository::list_between(store, user_id, start, end)
        })
    }
}

impl FeedbackRepository for Storage {
    async fn get(&self, user_id: &str, plan_date: NaiveDate) -> Result<Option<Feedback>, CoreError> {
        dispatch!(self, "get_feedback", |store| FeedbackRepository::get(
            store, user_id, plan_date
        ))
    }

    async fn create(&self, feedback: Feedback) -> Result<Feedback, CoreError> {
        dispatch!(self, "create_feedback", |store| store.create(feedback.clone()))
    }

    async fn list_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Feedback>, CoreError> {
        dispatch!(self, "list_feedback_between", |store| {
            FeedbackRepository::list_between(store, user_id, start, end)
        })
    }
}

impl HealthCheckRepository for Storage {
    async fn health(&self) -> Result<u64, CoreError> {
        dispatch!(self, "health", |store| HealthCheckRepository::health(store))
    }

    async fn readiness(&self) -> Result<StorageHealthStatus, CoreError> {
        match self {
            Storage::Local(local) => local.readiness().await,
            Storage::Remote(remote) => remote.readiness().await,
            Storage::Permissive { remote, local } => {
                let mut status = remote.readiness().await?;
                status.mode = "permissive".to_string();
                status.fallback_reachable = Some(local.readiness().await?.reachable);
                Ok(status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use reqwest::Client;

    use super::*;
    use crate::{
        domain::{common::FirestoreConfig, user_profile::value_objects::UpsertProfileInput},
        infrastructure::firestore::client::FirestoreClient,
    };

    fn unreachable_remote() -> FirestoreStore {
        FirestoreStore::new(FirestoreClient::new(
            Client::new(),
            FirestoreClient::documents_url_for("http://127.0.0.1:1", "demo"),
            None,
        ))
    }

    fn storage_config(mode: StorageMode) -> StorageConfig {
        StorageConfig {
            backend: StorageBackendKind::Firestore,
            mode,
            database_url: "sqlite::memory:".to_string(),
            firestore: FirestoreConfig {
                project_id: None,
                service_account_path: PathBuf::from("/nonexistent/firebase-service-account.json"),
                emulator_host: None,
                request_timeout_secs: 2,
            },
        }
    }

    #[tokio::test]
    async fn permissive_mode_falls_back_to_local_on_transient_errors() {
        let storage = Storage::Permissive {
            remote: unreachable_remote(),
            local: LocalStore::in_memory().await.unwrap(),
        };
        let profile = UserProfile::new(
            "u-1".to_string(),
            UpsertProfileInput {
                name: "Dev".to_string(),
                ..Default::default()
            },
        );

        storage.upsert(profile.clone()).await.unwrap();
        assert_eq!(storage.get_by_user_id("u-1").await.unwrap(), Some(profile));

        let status = storage.readiness().await.unwrap();
        assert_eq!(status.mode, "permissive");
        assert!(!status.reachable);
        assert_eq!(status.fallback_reachable, Some(true));
    }

    #[tokio::test]
    async fn remote_mode_surfaces_transient_errors() {
        let storage = Storage::Remote(unreachable_remote());
        let err = storage.get_by_user_id("u-1").await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn strict_mode_fails_fast_on_missing_credentials() {
        let err = Storage::from_config(&storage_config(StorageMode::Strict))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Configuration(ref m) if m.contains("firebase-service-account.json")));
    }

    #[tokio::test]
    async fn permissive_mode_uses_local_when_misconfigured() {
        let storage = Storage::from_config(&storage_config(StorageMode::Permissive))
            .await
            .unwrap();
        assert!(matches!(storage, Storage::Local(_)));
        assert_eq!(storage.backend_name(), "local");
    }
}
