use std::{fmt, path::PathBuf, str::FromStr};

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct VitaplanConfig {
    pub storage: StorageConfig,
    pub planner: PlannerConfig,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackendKind,
    pub mode: StorageMode,
    pub database_url: String,
    pub firestore: FirestoreConfig,
}

#[derive(Clone, Debug)]
pub struct FirestoreConfig {
    pub project_id: Option<String>,
    pub service_account_path: PathBuf,
    /// `host:port` of a local Firestore emulator. Disables OAuth when set.
    pub emulator_host: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct PlannerConfig {
    pub meals_per_slot: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { meals_per_slot: 2 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackendKind {
    Local,
    Firestore,
}

impl FromStr for StorageBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "sqlite" => Ok(Self::Local),
            "firestore" | "firebase" | "remote" => Ok(Self::Firestore),
            other => Err(format!(
                "unsupported storage backend `{other}`; expected local|firestore"
            )),
        }
    }
}

impl fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Firestore => f.write_str("firestore"),
        }
    }
}

/// How a remote backend behaves when it is misconfigured or unreachable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageMode {
    /// Fail at startup on configuration errors and surface transient errors.
    #[default]
    Strict,
    /// Use the local store whenever the remote one cannot serve a request.
    Permissive,
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(format!(
                "unsupported storage mode `{other}`; expected strict|permissive"
            )),
        }
    }
}

/// Current time at microsecond precision, the finest both backends keep.
pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now().trunc_subsecs(6);
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Document key shared by per-day records in both backends.
pub fn daily_document_id(user_id: &str, date: NaiveDate) -> String {
    format!("{}_{}", user_id, date.format("%Y-%m-%d"))
}
