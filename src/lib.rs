//! MoodEcho - Daily Journal with AI Mood Analysis
//!
//! Records one journal entry per day, asks an LLM for a mood score and a
//! one-sentence summary, and stores the entry with optional habit tags.
//! When the model is slow, down, or answers nonsense, the entry is still
//! saved with a neutral fallback score.
//!
//! ## Quick Start
//!
//! ```ignore
//! use moodecho::{AnalysisClient, CreateEntryRequest, Database, EntryIngestor, SqliteEntryStore};
//!
//! let db = Arc::new(Database::open("moodecho.db")?);
//! db.initialize()?;
//! let provider = create_provider(&config.analysis.provider_config())?;
//! let analyzer = AnalysisClient::new(provider, Duration::from_secs(10));
//! let ingestor = EntryIngestor::new(Arc::new(analyzer), Arc::new(SqliteEntryStore::new(db)));
//! let entry = ingestor
//!     .ingest(CreateEntryRequest::new("Long walk by the river", vec!["walk".into()]))
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: LLM providers, prompt, response coercion, analysis client
//! - [`ingest`]: the write path with fallback policy
//! - [`storage`]: SQLite persistence with connection pooling
//! - [`server`]: axum HTTP API
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod ingest;
pub mod server;
pub mod storage;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{AnalysisError, AnalysisErrorKind, JournalError, Result, ResultExt};

// Domain
pub use types::{CreateEntryRequest, Entry, HabitTag};

// Storage
pub use storage::database::PoolConfig;
pub use storage::{Database, EntryRepository, SharedDatabase, SqliteEntryStore};

// Ingestion
pub use ingest::{Clock, EntryIngestor, IngestOutcome, SystemClock};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    AnalysisClient, AnalysisResult, LlmProvider, LlmResponse, MoodAnalyzer, create_provider,
    with_timeout,
};
