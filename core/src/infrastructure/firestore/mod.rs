//! Remote store backed by the Firestore REST API.

pub mod client;
pub mod codec;
pub mod credentials;

use std::{sync::Arc, time::Duration};

use reqwest::Client;
use tracing::{error, info};

use crate::{
    domain::common::{FirestoreConfig, entities::app_errors::CoreError},
    infrastructure::firestore::{
        client::FirestoreClient,
        credentials::{ServiceAccountKey, TokenProvider},
    },
};

pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";
const EMULATOR_PROJECT_ID: &str = "demo-vitaplan";

pub const USERS: &str = "users";
pub const CONVERSATIONS: &str = "conversations";
pub const DIET_PLANS: &str = "diet_plans";
pub const FEEDBACK: &str = "feedback";

#[derive(Debug, Clone)]
pub struct FirestoreStore {
    pub client: FirestoreClient,
}

impl FirestoreStore {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }

    /// Builds the store, checking that the credentials it needs are present.
    pub fn from_config(config: &FirestoreConfig) -> Result<Self, CoreError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()
            .map_err(|e| {
                error!("Failed to build HTTP client: {}", e);
                CoreError::Configuration(format!("cannot build HTTP client: {e}"))
            })?;

        if let Some(host) = &config.emulator_host {
            let project_id = config
                .project_id
                .clone()
                .unwrap_or_else(|| EMULATOR_PROJECT_ID.to_string());
            info!(host = %host, project_id = %project_id, "using Firestore emulator");
            let documents_url =
                FirestoreClient::documents_url_for(&format!("http://{host}"), &project_id);
            return Ok(Self::new(FirestoreClient::new(http, documents_url, None)));
        }

        if !config.service_account_path.exists() {
            return Err(CoreError::Configuration(format!(
                "service account file `{}` not found (FIREBASE_SERVICE_ACCOUNT)",
                config.service_account_path.display()
            )));
        }
        let key = ServiceAccountKey::from_file(&config.service_account_path)?;

        let project_id = config
            .project_id
            .clone()
            .filter(|p| !p.trim().is_empty())
            .or_else(|| key.project_id.clone())
            .ok_or_else(|| {
                CoreError::Configuration(
                    "Firebase project id is missing (FIREBASE_PROJECT_ID)".to_string(),
                )
            })?;

        let provider = TokenProvider::new(key, http.clone())?;
        info!(
            project_id = %project_id,
            client_email = provider.client_email(),
            "using Firestore"
        );

        let documents_url = FirestoreClient::documents_url_for(FIRESTORE_BASE_URL, &project_id);
        Ok(Self::new(FirestoreClient::new(
            http,
            documents_url,
            Some(Arc::new(provider)),
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config() -> FirestoreConfig {
        FirestoreConfig {
            project_id: Some("vitaplan".to_string()),
            service_account_path: PathBuf::from("/nonexistent/firebase-service-account.json"),
            emulator_host: None,
            request_timeout_secs: 5,
        }
    }

    #[test]
    fn missing_service_account_file_is_named() {
        match FirestoreStore::from_config(&config()) {
            Err(CoreError::Configuration(message)) => {
                assert!(message.contains("firebase-service-account.json"))
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn missing_project_id_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sa.json");
        std::fs::write(
            &path,
            serde_json::json!({
                "client_email": "planner@example.iam.gserviceaccount.com",
                "private_key": include_str!("testdata/test_private_key.pem"),
            })
            .to_string(),
        )
        .unwrap();

        let mut config = config();
        config.project_id = None;
        config.service_account_path = path;

        match FirestoreStore::from_config(&config) {
            Err(CoreError::Configuration(message)) => {
                assert!(message.contains("FIREBASE_PROJECT_ID"))
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn emulator_needs_no_credentials() {
        let mut config = config();
        config.emulator_host = Some("localhost:8080".to_string());
        assert!(FirestoreStore::from_config(&config).is_ok());
    }
}
