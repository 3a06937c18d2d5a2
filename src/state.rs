use std::fs;
use std::sync::Arc;

use anyhow::Context;
use roster_config::AppConfig;
use roster_db::{SqlitePool, init_db_pool};

use crate::modules::students::{SqliteStudentRepository, StudentRepository, StudentService};
use crate::modules::transfer::CsvTransferService;

/// Everything a host needs, built once per process and shared by cloning.
#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub transfer: CsvTransferService,
    pub config: AppConfig,
}

impl AppState {
    /// Wires the services over an already-open pool.
    pub fn with_pool(db: SqlitePool, config: AppConfig) -> Self {
        let repo: Arc<dyn StudentRepository> = Arc::new(SqliteStudentRepository::new(db));
        Self {
            students: StudentService::new(repo),
            transfer: CsvTransferService::new(config.storage.data_dir()),
            config,
        }
    }
}

/// Creates the data directory and the database file's directory, opens the
/// database and builds the services.
pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let mut dirs = vec![config.storage.data_dir().to_path_buf()];
    if let Some(parent) = config
        .database
        .file_path()
        .and_then(|path| path.parent().map(|p| p.to_path_buf()))
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        dirs.push(parent);
    }
    for dir in &dirs {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let db = init_db_pool(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;

    Ok(AppState::with_pool(db, config))
}
