use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser};
use vitaplan_core::domain::common::{
    FirestoreConfig, PlannerConfig, StorageBackendKind, StorageConfig, StorageMode,
    VitaplanConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "vitaplan", version, about = "Condition-aware diet plans over HTTP")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,
    #[command(flatten)]
    pub storage: StorageArgs,
    #[command(flatten)]
    pub planner: PlannerArgs,
    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct StorageArgs {
    #[arg(long = "storage-backend", env = "STORAGE_BACKEND", default_value = "local")]
    pub backend: StorageBackendKind,

    #[arg(long = "storage-mode", env = "STORAGE_MODE", default_value = "strict")]
    pub mode: StorageMode,

    #[arg(
        long = "database-url",
        env = "DATABASE_URL",
        default_value = "sqlite://vitaplan.db?mode=rwc"
    )]
    pub database_url: String,

    #[arg(long = "firebase-project-id", env = "FIREBASE_PROJECT_ID")]
    pub firebase_project_id: Option<String>,

    #[arg(
        long = "firebase-service-account",
        env = "FIREBASE_SERVICE_ACCOUNT",
        default_value = "firebase-service-account.json"
    )]
    pub firebase_service_account: PathBuf,

    #[arg(long = "firestore-emulator-host", env = "FIRESTORE_EMULATOR_HOST")]
    pub firestore_emulator_host: Option<String>,

    #[arg(
        long = "firestore-timeout-secs",
        env = "FIRESTORE_TIMEOUT_SECS",
        default_value_t = 10
    )]
    pub firestore_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct PlannerArgs {
    #[arg(long = "meals-per-slot", env = "MEALS_PER_SLOT", default_value_t = 2)]
    pub meals_per_slot: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for VitaplanConfig {
    fn from(args: Args) -> Self {
        Self {
            storage: StorageConfig {
                backend: args.storage.backend,
                mode: args.storage.mode,
                database_url: args.storage.database_url,
                firestore: FirestoreConfig {
                    project_id: args.storage.firebase_project_id,
                    service_account_path: args.storage.firebase_service_account,
                    emulator_host: args
                        .storage
                        .firestore_emulator_host
                        .filter(|h| !h.trim().is_empty()),
                    request_timeout_secs: args.storage.firestore_timeout_secs,
                },
            },
            planner: PlannerConfig {
                meals_per_slot: args.planner.meals_per_slot.max(1),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_convert_into_core_config() {
        let args = Args::parse_from([
            "vitaplan",
            "--storage-backend",
            "firestore",
            "--storage-mode",
            "permissive",
            "--firebase-project-id",
            "vitaplan-dev",
            "--meals-per-slot",
            "3",
        ]);
        let config = VitaplanConfig::from(args);

        assert_eq!(config.storage.backend, StorageBackendKind::Firestore);
        assert_eq!(config.storage.mode, StorageMode::Permissive);
        assert_eq!(
            config.storage.firestore.project_id.as_deref(),
            Some("vitaplan-dev")
        );
        assert_eq!(config.planner.meals_per_slot, 3);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(Args::try_parse_from(["vitaplan", "--storage-backend", "mongo"]).is_err());
    }
}
