use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vitaplan_core::domain::conversation::{
    entities::ConversationEntry, ports::ConversationService,
};

use crate::application::{
    http::{
        conversation::validators::LogMessageValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
    user_middleware::UserContext,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LogMessageResponse {
    pub data: ConversationEntry,
}

#[utoipa::path(
    post,
    path = "",
    tag = "conversation",
    summary = "Append conversation entry",
    params(("x-user-id" = String, Header, description = "Caller id")),
    request_body = LogMessageValidator,
    responses((status = 201, body = LogMessageResponse))
)]
pub async fn log_message(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    ValidateJson(payload): ValidateJson<LogMessageValidator>,
) -> Result<Response<LogMessageResponse>, ApiError> {
    let entry = state
        .service
        .log_message(&user.user_id, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(LogMessageResponse { data: entry }))
}
