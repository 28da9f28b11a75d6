//! Shared server state

use std::sync::Arc;

use crate::ingest::EntryIngestor;

#[derive(Clone)]
pub struct AppState {
    pub ingestor: Arc<EntryIngestor>,
}

impl AppState {
    pub fn new(ingestor: Arc<EntryIngestor>) -> Self {
        Self { ingestor }
    }
}
