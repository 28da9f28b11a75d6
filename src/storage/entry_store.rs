//! Entry repository
//!
//! `EntryRepository` is the storage seam the ingestor writes through.
//! `SqliteEntryStore` persists an entry and its habit tags in one
//! transaction and relies on the `UNIQUE(entry_date)` constraint for the
//! one-entry-per-day rule.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, params};
use uuid::Uuid;

use super::SharedDatabase;
use crate::types::{Entry, HabitTag, JournalError, NewEntry, Result, ResultExt};

/// Storage collaborator for journal entries
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Persist an entry together with its habit tags, all or nothing.
    ///
    /// Fails with `JournalError::DuplicateEntry` when the date is taken.
    async fn save(&self, entry: NewEntry) -> Result<Entry>;

    /// All entries ordered by date, tags in insertion order
    async fn list_all(&self) -> Result<Vec<Entry>>;
}

/// Row shape of `daily_entries`: (id, date, content, mood, summary, created_at)
type EntryRow = (String, String, String, Option<i32>, Option<String>, String);

/// Row shape of `habit_logs`: (id, entry_id, habit_name, completed)
type HabitRow = (String, String, String, bool);

/// Summary figures for `moodecho status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub entry_count: usize,
    pub latest_date: Option<NaiveDate>,
}

/// SQLite-backed entry repository
#[derive(Clone)]
pub struct SqliteEntryStore {
    db: SharedDatabase,
}

impl SqliteEntryStore {
    pub fn new(db: SharedDatabase) -> Self {
        Self { db }
    }

    /// Blocking insert of an entry and its tags.
    pub fn save_blocking(&self, entry: &NewEntry) -> Result<()> {
        self.db.transaction(|conn| {
            conn.execute(
                "INSERT INTO daily_entries
                 (id, entry_date, journal_content, mood_score, ai_summary, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    entry.id.to_string(),
                    entry.date.to_string(),
                    entry.journal_content,
                    entry.mood_score,
                    entry.ai_summary,
                    entry.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| map_insert_error(e, entry.date))?;

            if !entry.habit_logs.is_empty() {
                let mut stmt = conn
                    .prepare_cached(
                        "INSERT INTO habit_logs (id, entry_id, position, habit_name, completed)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                    )
                    .with_context("Failed to prepare habit log statement")?;

                for (position, tag) in entry.habit_logs.iter().enumerate() {
                    stmt.execute(params![
                        tag.id.to_string(),
                        tag.entry_id.to_string(),
                        position as i64,
                        tag.habit_name,
                        tag.completed,
                    ])
                    .with_context("Failed to insert habit log")?;
                }
            }

            Ok(())
        })?;

        tracing::debug!(
            "Stored entry {} for {} with {} habit tag(s)",
            entry.id,
            entry.date,
            entry.habit_logs.len()
        );
        Ok(())
    }

    /// Blocking read of every entry with its tags.
    pub fn list_blocking(&self) -> Result<Vec<Entry>> {
        let conn = self.db.connection()?;
        let mut tags_by_entry = load_habit_logs(&conn)?;

        let mut stmt = conn
            .prepare(
                "SELECT id, entry_date, journal_content, mood_score, ai_summary, created_at
                 FROM daily_entries
                 ORDER BY entry_date",
            )
            .with_context("Failed to prepare entry query")?;

        let rows: Vec<EntryRow> = stmt
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context("Failed to fetch entries")?;

        let mut entries = Vec::with_capacity(rows.len());
        for (id, date, journal_content, mood_score, ai_summary, created_at) in rows {
            let id = parse_uuid(&id, "entry")?;
            entries.push(Entry {
                id,
                date: parse_date(&date)?,
                journal_content,
                mood_score,
                ai_summary,
                created_at: parse_timestamp(&created_at)?,
                habit_logs: tags_by_entry.remove(&id).unwrap_or_default(),
            });
        }

        Ok(entries)
    }

    /// Entry count and most recent date
    pub fn stats(&self) -> Result<StoreStats> {
        let conn = self.db.connection()?;
        let (count, latest): (i64, Option<String>) = conn
            .query_row(
                "SELECT COUNT(*), MAX(entry_date) FROM daily_entries",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .with_context("Failed to read entry stats")?;

        Ok(StoreStats {
            entry_count: count as usize,
            latest_date: latest.as_deref().map(parse_date).transpose()?,
        })
    }
}

#[async_trait]
impl EntryRepository for SqliteEntryStore {
    async fn save(&self, entry: NewEntry) -> Result<Entry> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            store.save_blocking(&entry)?;
            Ok(entry.into_entry())
        })
        .await
        .map_err(|e| JournalError::Storage(format!("Entry save task failed: {}", e)))?
    }

    async fn list_all(&self) -> Result<Vec<Entry>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.list_blocking())
            .await
            .map_err(|e| JournalError::Storage(format!("Entry list task failed: {}", e)))?
    }
}

/// Habit tags grouped by owning entry, each group in insertion order
fn load_habit_logs(conn: &Connection) -> Result<HashMap<Uuid, Vec<HabitTag>>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, entry_id, habit_name, completed
             FROM habit_logs
             ORDER BY entry_id, position",
        )
        .with_context("Failed to prepare habit log query")?;

    let rows: Vec<HabitRow> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context("Failed to fetch habit logs")?;

    let mut grouped: HashMap<Uuid, Vec<HabitTag>> = HashMap::new();
    for (id, entry_id, habit_name, completed) in rows {
        let entry_id = parse_uuid(&entry_id, "habit log owner")?;
        grouped.entry(entry_id).or_default().push(HabitTag {
            id: parse_uuid(&id, "habit log")?,
            habit_name,
            completed,
            entry_id,
        });
    }

    Ok(grouped)
}

/// Turn a unique-date violation into a domain error; anything else stays a database error
fn map_insert_error(err: rusqlite::Error, date: NaiveDate) -> JournalError {
    let is_unique_violation = err
        .sqlite_error()
        .is_some_and(|e| e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE);

    if is_unique_violation {
        JournalError::DuplicateEntry { date }
    } else {
        JournalError::Database(err)
    }
}

fn parse_uuid(raw: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context_fn(|| format!("Corrupted {} id '{}'", what, raw))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    raw.parse::<NaiveDate>()
        .with_context_fn(|| format!("Corrupted entry date '{}'", raw))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context_fn(|| format!("Corrupted created_at '{}'", raw))
}
