//! CLI Common Utilities
//!
//! Shared initialization and context management for CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::ai::{AnalysisClient, MoodAnalyzer, UnavailableAnalyzer, create_provider};
use crate::config::{Config, ConfigLoader};
use crate::constants::storage;
use crate::ingest::EntryIngestor;
use crate::storage::{Database, SharedDatabase, SqliteEntryStore};
use crate::types::{JournalError, Result};

/// Command execution context
///
/// Created via `CommandContext::load()` once the project is initialized.
#[derive(Clone)]
pub struct CommandContext {
    /// Shared database handle
    pub db: SharedDatabase,
    /// Loaded configuration
    pub config: Config,
}

impl CommandContext {
    /// Validates initialization, loads config, and opens the database.
    pub fn load() -> Result<Self> {
        require_initialized()?;
        let config = ConfigLoader::load()?;
        let db = open_database(&config.storage.database_path)?;

        Ok(Self {
            db: Arc::new(db),
            config,
        })
    }

    pub fn store(&self) -> SqliteEntryStore {
        SqliteEntryStore::new(self.db.clone())
    }

    /// Analyzer for the configured provider.
    ///
    /// A provider that cannot be constructed (missing key, bad endpoint)
    /// degrades to an analyzer that always fails, so entries still save.
    pub fn analyzer(&self) -> Arc<dyn MoodAnalyzer> {
        let analysis = &self.config.analysis;
        match create_provider(&analysis.provider_config()) {
            Ok(provider) => Arc::new(AnalysisClient::new(
                provider,
                Duration::from_secs(analysis.timeout_secs),
            )),
            Err(e) => {
                warn!("Mood analysis unavailable: {}", e);
                Arc::new(UnavailableAnalyzer::new(e.to_string()))
            }
        }
    }

    pub fn ingestor(&self) -> EntryIngestor {
        EntryIngestor::new(self.analyzer(), Arc::new(self.store()))
    }
}

/// Project data directory path (without validation)
pub fn data_dir() -> PathBuf {
    PathBuf::from(storage::DATA_DIR)
}

/// Check if MoodEcho is initialized in the current directory
pub fn is_initialized() -> bool {
    data_dir().exists()
}

/// Returns the data directory, or `JournalError::NotInitialized`.
pub fn require_initialized() -> Result<PathBuf> {
    let dir = data_dir();
    if !dir.exists() {
        return Err(JournalError::NotInitialized);
    }
    Ok(dir)
}

/// Open an existing database
pub fn open_database(db_path: &Path) -> Result<Database> {
    if !db_path.exists() {
        return Err(JournalError::NotInitialized);
    }

    let db = Database::open(db_path)?;
    db.initialize()?;
    Ok(db)
}

/// Create and initialize the database, including its parent directory
pub fn create_database(db_path: &Path) -> Result<Database> {
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::open(db_path)?;
    db.initialize()?;
    Ok(db)
}
