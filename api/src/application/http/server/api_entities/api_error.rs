use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::Validate;
use vitaplan_core::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, &str) {
        match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST", m),
            ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "E_UNAUTHORIZED", m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, "E_NOT_FOUND", m),
            ApiError::Conflict(m) => (StatusCode::CONFLICT, "E_CONFLICT", m),
            ApiError::ServiceUnavailable(m) => {
                (StatusCode::SERVICE_UNAVAILABLE, "E_SERVICE_UNAVAILABLE", m)
            }
            ApiError::InternalServerError(m) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR", m)
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            CoreError::Invalid(message) => ApiError::BadRequest(message),
            CoreError::AlreadyExists => {
                ApiError::Conflict("Resource already exists".to_string())
            }
            CoreError::ExternalServiceError(message) => {
                error!("Storage backend unavailable: {}", message);
                ApiError::ServiceUnavailable("Storage backend unavailable".to_string())
            }
            CoreError::Configuration(message) => {
                error!("Configuration error: {}", message);
                ApiError::InternalServerError("Server misconfigured".to_string())
            }
            CoreError::InternalServerError => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = ErrorResponse {
            code: code.to_string(),
            message: message.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that also runs the payload's `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string().replace('\n', ", ")))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_http_statuses() {
        let cases = [
            (CoreError::NotFound, StatusCode::NOT_FOUND),
            (CoreError::Invalid("x".into()), StatusCode::BAD_REQUEST),
            (CoreError::AlreadyExists, StatusCode::CONFLICT),
            (
                CoreError::ExternalServiceError("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                CoreError::Configuration("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (core, status) in cases {
            assert_eq!(ApiError::from(core).into_response().status(), status);
        }
    }

    #[test]
    fn invalid_keeps_its_message() {
        assert_eq!(
            ApiError::from(CoreError::Invalid("age must be between 1 and 120".into())),
            ApiError::BadRequest("age must be between 1 and 120".into())
        );
    }
}
