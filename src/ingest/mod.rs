//! Entry ingestion
//!
//! The single write path: validate the request, ask the analyzer for a mood,
//! substitute the fallback on any analysis failure, then persist the entry
//! and its habit tags as one unit.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::ai::{AnalysisResult, MoodAnalyzer};
use crate::constants::analysis::{FALLBACK_MOOD_SCORE, FALLBACK_SUMMARY};
use crate::storage::EntryRepository;
use crate::types::{CreateEntryRequest, Entry, HabitTag, NewEntry, Result};

/// Source of the calendar date an entry is filed under
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Substitute used whenever the analyzer cannot be trusted
pub fn fallback_analysis() -> AnalysisResult {
    AnalysisResult {
        mood_score: FALLBACK_MOOD_SCORE,
        summary: Some(FALLBACK_SUMMARY.to_string()),
    }
}

/// A saved entry and whether its mood came from the fallback
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub entry: Entry,
    pub used_fallback: bool,
}

pub struct EntryIngestor {
    analyzer: Arc<dyn MoodAnalyzer>,
    repository: Arc<dyn EntryRepository>,
    clock: Arc<dyn Clock>,
}

impl EntryIngestor {
    pub fn new(analyzer: Arc<dyn MoodAnalyzer>, repository: Arc<dyn EntryRepository>) -> Self {
        Self::with_clock(analyzer, repository, Arc::new(SystemClock))
    }

    pub fn with_clock(
        analyzer: Arc<dyn MoodAnalyzer>,
        repository: Arc<dyn EntryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            analyzer,
            repository,
            clock,
        }
    }

    /// Record today's entry.
    ///
    /// Analysis failures never fail the write. Validation, duplicate-date and
    /// storage errors do, and leave nothing behind.
    pub async fn ingest(&self, request: CreateEntryRequest) -> Result<Entry> {
        Ok(self.ingest_with_outcome(request).await?.entry)
    }

    /// Same as [`EntryIngestor::ingest`], also reporting whether the
    /// analyzer's answer was replaced by the fallback.
    pub async fn ingest_with_outcome(&self, request: CreateEntryRequest) -> Result<IngestOutcome> {
        request.validate()?;

        let (analysis, used_fallback) = match self.analyzer.analyze(&request.journal).await {
            Ok(analysis) => (analysis, false),
            Err(e) => {
                warn!(kind = %e.kind, "Using fallback mood analysis");
                (fallback_analysis(), true)
            }
        };

        let entry = self.assemble(request, analysis);
        let date = entry.date;
        let saved = self.repository.save(entry).await?;

        info!(
            "Saved entry for {} (mood {:?}, {} habit tag(s))",
            date,
            saved.mood_score,
            saved.habit_logs.len()
        );
        Ok(IngestOutcome {
            entry: saved,
            used_fallback,
        })
    }

    /// Every stored entry, oldest date first
    pub async fn list_all(&self) -> Result<Vec<Entry>> {
        self.repository.list_all().await
    }

    fn assemble(&self, request: CreateEntryRequest, analysis: AnalysisResult) -> NewEntry {
        let id = Uuid::new_v4();
        let habit_logs = request
            .habit_names()
            .iter()
            .map(|name| HabitTag::completed(id, name.as_str()))
            .collect();

        NewEntry {
            id,
            date: self.clock.today(),
            journal_content: request.journal,
            mood_score: Some(analysis.mood_score),
            ai_summary: analysis.summary,
            created_at: Utc::now(),
            habit_logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, SqliteEntryStore};
    use crate::types::{AnalysisError, JournalError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    /// Analyzer returning a canned outcome and counting calls
    struct StubAnalyzer {
        outcome: std::result::Result<AnalysisResult, AnalysisError>,
        calls: AtomicUsize,
    }

    impl StubAnalyzer {
        fn ok(mood_score: i32, summary: &str) -> Self {
            Self {
                outcome: Ok(AnalysisResult {
                    mood_score,
                    summary: Some(summary.to_string()),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(error: AnalysisError) -> Self {
            Self {
                outcome: Err(error),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MoodAnalyzer for StubAnalyzer {
        async fn analyze(
            &self,
            _journal_text: &str,
        ) -> std::result::Result<AnalysisResult, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn store() -> Arc<SqliteEntryStore> {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        Arc::new(SqliteEntryStore::new(Arc::new(db)))
    }

    fn ingestor(
        analyzer: Arc<StubAnalyzer>,
        store: Arc<SqliteEntryStore>,
        date: NaiveDate,
    ) -> EntryIngestor {
        EntryIngestor::with_clock(analyzer, store, Arc::new(FixedClock(date)))
    }

    fn request(journal: &str, habits: &[&str]) -> CreateEntryRequest {
        CreateEntryRequest::new(journal, habits.iter().map(|h| h.to_string()).collect())
    }

    #[tokio::test]
    async fn test_ingest_uses_analysis() {
        let analyzer = Arc::new(StubAnalyzer::ok(8, "A productive day."));
        let ingestor = ingestor(analyzer.clone(), store(), day(1));

        let entry = ingestor
            .ingest(request("Shipped the feature", &[]))
            .await
            .unwrap();

        assert_eq!(entry.date, day(1));
        assert_eq!(entry.journal_content, "Shipped the feature");
        assert_eq!(entry.mood_score, Some(8));
        assert_eq!(entry.ai_summary.as_deref(), Some("A productive day."));
        assert!(entry.habit_logs.is_empty());
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ingest_falls_back_on_every_failure_kind() {
        let failures = [
            AnalysisError::timeout(std::time::Duration::from_secs(10)),
            AnalysisError::transport("connection refused"),
            AnalysisError::response_shape("response is not valid JSON"),
            AnalysisError::response_shape("mood_score is missing"),
            AnalysisError::response_shape("mood_score 'notanumber' is not an integer"),
        ];

        for (i, failure) in failures.into_iter().enumerate() {
            let analyzer = Arc::new(StubAnalyzer::failing(failure));
            let ingestor = ingestor(analyzer, store(), day(i as u32 + 1));

            let entry = ingestor.ingest(request("Rainy", &["read"])).await.unwrap();
            assert_eq!(entry.mood_score, Some(FALLBACK_MOOD_SCORE));
            assert_eq!(entry.ai_summary.as_deref(), Some(FALLBACK_SUMMARY));
            assert_eq!(entry.habit_logs.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_outcome_reports_fallback() {
        let failing = Arc::new(StubAnalyzer::failing(AnalysisError::transport("down")));
        let outcome = ingestor(failing, store(), day(6))
            .ingest_with_outcome(request("Quiet", &[]))
            .await
            .unwrap();
        assert!(outcome.used_fallback);
        assert_eq!(outcome.entry.mood_score, Some(FALLBACK_MOOD_SCORE));

        // A model answer that happens to match the fallback text is still an answer
        let echoing = Arc::new(StubAnalyzer::ok(FALLBACK_MOOD_SCORE, FALLBACK_SUMMARY));
        let outcome = ingestor(echoing, store(), day(7))
            .ingest_with_outcome(request("Quiet", &[]))
            .await
            .unwrap();
        assert!(!outcome.used_fallback);
    }

    #[tokio::test]
    async fn test_ingest_habits_ordered_with_duplicates() {
        let store = store();
        let ingestor = ingestor(Arc::new(StubAnalyzer::ok(6, "ok")), store.clone(), day(3));

        let entry = ingestor
            .ingest(request("Busy", &["run", "run", "meditate"]))
            .await
            .unwrap();

        let names: Vec<_> = entry
            .habit_logs
            .iter()
            .map(|h| h.habit_name.as_str())
            .collect();
        assert_eq!(names, vec!["run", "run", "meditate"]);
        assert!(entry.habit_logs.iter().all(|h| h.completed));
        assert!(entry.habit_logs.iter().all(|h| h.entry_id == entry.id));

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed, vec![entry]);
    }

    #[tokio::test]
    async fn test_ingest_rejects_second_entry_same_day() {
        let store = store();
        let ingestor = ingestor(Arc::new(StubAnalyzer::ok(6, "ok")), store.clone(), day(4));

        ingestor.ingest(request("Morning", &["run"])).await.unwrap();
        let err = ingestor
            .ingest(request("Evening", &["swim", "read"]))
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::DuplicateEntry { date } if date == day(4)));

        let listed = ingestor.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].journal_content, "Morning");
        assert_eq!(listed[0].habit_logs.len(), 1);
    }

    #[tokio::test]
    async fn test_ingest_validation_skips_analysis() {
        let analyzer = Arc::new(StubAnalyzer::ok(6, "ok"));
        let ingestor = ingestor(analyzer.clone(), store(), day(5));

        let err = ingestor.ingest(request("   ", &[])).await.unwrap_err();
        assert!(matches!(err, JournalError::Validation(_)));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
        assert!(ingestor.list_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_fallback_values() {
        let fallback = fallback_analysis();
        assert_eq!(fallback.mood_score, 5);
        assert_eq!(
            fallback.summary.as_deref(),
            Some("AI is taking a nap, but your entry is saved.")
        );
    }
}
