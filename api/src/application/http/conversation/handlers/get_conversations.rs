use axum::{
    Extension,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use vitaplan_core::domain::conversation::{
    entities::ConversationEntry, ports::ConversationService,
};

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    user_middleware::UserContext,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetConversationsQuery {
    /// Defaults to 50, capped at 200.
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetConversationsResponse {
    pub data: Vec<ConversationEntry>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "conversation",
    summary = "Conversation history",
    description = "Newest entries first.",
    params(
        ("x-user-id" = String, Header, description = "Caller id"),
        GetConversationsQuery
    ),
    responses((status = 200, body = GetConversationsResponse))
)]
pub async fn get_conversations(
    Query(query): Query<GetConversationsQuery>,
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetConversationsResponse>, ApiError> {
    let entries = state
        .service
        .conversation_history(&user.user_id, query.limit)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetConversationsResponse { data: entries }))
}
