use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::domain::common::entities::app_errors::CoreError;

pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before they expire.
const REFRESH_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The subset of a Google service-account JSON key used for OAuth.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(default)]
    pub project_id: Option<String>,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Configuration(format!(
                "service account file `{}` could not be read: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&raw).map_err(|e| match e {
            CoreError::Configuration(detail) => {
                CoreError::Configuration(format!("{} ({})", detail, path.display()))
            }
            other => other,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw)
            .map_err(|e| CoreError::Configuration(format!("invalid service account key: {e}")))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Exchanges signed service-account assertions for OAuth access tokens.
pub struct TokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: Client,
    cached: RwLock<Option<CachedToken>>,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("client_email", &self.key.client_email)
            .field("token_uri", &self.key.token_uri)
            .finish_non_exhaustive()
    }
}

impl TokenProvider {
    pub fn new(key: ServiceAccountKey, http: Client) -> Result<Self, CoreError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            CoreError::Configuration(format!("service account private key is not valid RSA PEM: {e}"))
        })?;

        Ok(Self {
            key,
            encoding_key,
            http,
            cached: RwLock::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    pub(crate) fn assertion(&self, now: DateTime<Utc>) -> Result<String, CoreError> {
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: DATASTORE_SCOPE.to_string(),
            aud: self.key.token_uri.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key).map_err(
            |e| {
                error!("Failed to sign service account assertion: {}", e);
                CoreError::InternalServerError
            },
        )
    }

    /// A valid access token, fetched again only when the cached one is about to expire.
    pub async fn access_token(&self) -> Result<String, CoreError> {
        let now = Utc::now();
        if let Some(token) = self.cached.read().await.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.access_token.clone());
            }
        }

        let mut cached = self.cached.write().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.access_token.clone());
            }
        }

        let token = self.fetch(now).await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    async fn fetch(&self, now: DateTime<Utc>) -> Result<CachedToken, CoreError> {
        let assertion = self.assertion(now)?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                error!("OAuth token request failed: {}", e);
                CoreError::ExternalServiceError(format!("token endpoint unreachable: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("OAuth token endpoint error: {} - {}", status, error_text);
            return Err(if status.is_server_error() || status.as_u16() == 429 {
                CoreError::ExternalServiceError(format!("token endpoint returned {status}"))
            } else {
                CoreError::Configuration(format!(
                    "service account `{}` was rejected: {}",
                    self.key.client_email, status
                ))
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            error!("Failed to parse OAuth token response: {}", e);
            CoreError::ExternalServiceError(format!("invalid token response: {e}"))
        })?;

        debug!(expires_in = token.expires_in, "fetched Firestore access token");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{DecodingKey, Validation};

    use super::*;

    const PRIVATE_KEY: &str = include_str!("testdata/test_private_key.pem");
    const PUBLIC_KEY: &str = include_str!("testdata/test_public_key.pem");

    fn key() -> ServiceAccountKey {
        ServiceAccountKey::from_json(
            &serde_json::json!({
                "type": "service_account",
                "project_id": "vitaplan-test",
                "client_email": "planner@vitaplan-test.iam.gserviceaccount.com",
                "private_key": PRIVATE_KEY,
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn key_defaults_token_uri() {
        let key = key();
        assert_eq!(key.token_uri, DEFAULT_TOKEN_URI);
        assert_eq!(key.project_id.as_deref(), Some("vitaplan-test"));
    }

    #[test]
    fn assertion_is_signed_rs256_for_the_token_endpoint() {
        let provider = TokenProvider::new(key(), Client::new()).unwrap();
        let now = Utc::now();
        let jwt = provider.assertion(now).unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[DEFAULT_TOKEN_URI]);
        let decoded = jsonwebtoken::decode::<AssertionClaims>(
            &jwt,
            &DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(decoded.claims.iss, provider.client_email());
        assert_eq!(decoded.claims.scope, DATASTORE_SCOPE);
        assert_eq!(decoded.claims.exp - decoded.claims.iat, ASSERTION_LIFETIME_SECS);
    }

    #[test]
    fn invalid_private_key_is_a_configuration_error() {
        let mut key = key();
        key.private_key = "not a key".to_string();
        assert!(matches!(
            TokenProvider::new(key, Client::new()),
            Err(CoreError::Configuration(_))
        ));
    }

    #[test]
    fn missing_key_file_names_the_path() {
        let err = ServiceAccountKey::from_file(Path::new("/nonexistent/sa.json")).unwrap_err();
        match err {
            CoreError::Configuration(message) => assert!(message.contains("/nonexistent/sa.json")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn cached_token_refreshes_before_expiry() {
        let now = Utc::now();
        let token = CachedToken {
            access_token: "t".to_string(),
            expires_at: now + Duration::seconds(30),
        };
        assert!(!token.is_fresh(now));
        let token = CachedToken {
            expires_at: now + Duration::seconds(3000),
            ..token
        };
        assert!(token.is_fresh(now));
    }
}
