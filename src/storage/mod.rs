pub mod database;
pub mod entry_store;

pub use database::{Database, PoolConfig, SharedDatabase};
pub use entry_store::{EntryRepository, SqliteEntryStore, StoreStats};
