use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StorageHealthStatus {
    /// `local` or `firestore`.
    pub backend: String,
    /// `strict` or `permissive`.
    pub mode: String,
    pub reachable: bool,
    pub response_time_ms: u64,
    /// Reachability of the local fallback store, in permissive mode only.
    pub fallback_reachable: Option<bool>,
}
