//! Journal entry and habit tag types
//!
//! `Entry` owns its habit tags. A tag only knows its owner through the
//! `entry_id` foreign key, which is never serialized.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{JournalError, Result, ValidationErrorKind};

/// A persisted daily journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub journal_content: String,
    pub mood_score: Option<i32>,
    pub ai_summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub habit_logs: Vec<HabitTag>,
}

/// A named habit marker attached to one entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitTag {
    pub id: Uuid,
    pub habit_name: String,
    pub completed: bool,
    /// Owning entry; storage-only
    #[serde(skip)]
    pub entry_id: Uuid,
}

impl HabitTag {
    /// Tag a habit as completed for the given entry
    pub fn completed(entry_id: Uuid, habit_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            habit_name: habit_name.into(),
            completed: true,
            entry_id,
        }
    }
}

/// A fully assembled entry that has not been written yet
///
/// Built in memory by the ingestor and handed to the repository as one unit.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub journal_content: String,
    pub mood_score: Option<i32>,
    pub ai_summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub habit_logs: Vec<HabitTag>,
}

impl NewEntry {
    /// Promote to a persisted entry once the repository has committed it
    pub fn into_entry(self) -> Entry {
        Entry {
            id: self.id,
            date: self.date,
            journal_content: self.journal_content,
            mood_score: self.mood_score,
            ai_summary: self.ai_summary,
            created_at: self.created_at,
            habit_logs: self.habit_logs,
        }
    }
}

/// Inbound request to create today's entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEntryRequest {
    pub journal: String,
    #[serde(default)]
    pub habits: Option<Vec<String>>,
}

impl CreateEntryRequest {
    pub fn new(journal: impl Into<String>, habits: Vec<String>) -> Self {
        Self {
            journal: journal.into(),
            habits: Some(habits),
        }
    }

    /// Reject requests the ingestor cannot turn into an entry
    pub fn validate(&self) -> Result<()> {
        if self.journal.trim().is_empty() {
            return Err(JournalError::validation(
                ValidationErrorKind::MissingField,
                "journal",
                "journal text must not be empty",
            ));
        }

        if let Some(position) = self
            .habit_names()
            .iter()
            .position(|name| name.trim().is_empty())
        {
            return Err(JournalError::validation(
                ValidationErrorKind::Format,
                format!("habits[{}]", position),
                "habit name must not be empty",
            ));
        }

        Ok(())
    }

    /// Habit names in request order, duplicates included
    pub fn habit_names(&self) -> &[String] {
        self.habits.as_deref().unwrap_or_default()
    }
}
