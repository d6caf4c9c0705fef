use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{
    common::entities::app_errors::CoreError,
    conversation::{entities::ConversationEntry, value_objects::LogMessageInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait ConversationRepository: Send + Sync {
    fn append(
        &self,
        entry: ConversationEntry,
    ) -> impl Future<Output = Result<ConversationEntry, CoreError>> + Send;

    /// Newest entries first.
    fn list_recent(
        &self,
        user_id: &str,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<ConversationEntry>, CoreError>> + Send;
}

pub trait ConversationService: Send + Sync {
    fn log_message(
        &self,
        user_id: &str,
        input: LogMessageInput,
    ) -> impl Future<Output = Result<ConversationEntry, CoreError>> + Send;

    fn conversation_history(
        &self,
        user_id: &str,
        limit: Option<u64>,
    ) -> impl Future<Output = Result<Vec<ConversationEntry>, CoreError>> + Send;

    fn last_interaction_date(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<NaiveDate>, CoreError>> + Send;
}
