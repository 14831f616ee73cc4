//! Domain model for organizer entries and their expanded occurrences.
//!
//! `Entry` is the persisted record shape shared by calendar events and
//! tasks; `Occurrence` is one materialized instance of a recurring entry
//! and is never written to storage. `QueryItem` is the uniform record
//! both collapse into for query results.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Entry kind without database dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Event,
    Task,
}

impl EntryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Task => "task",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task lifecycle status. Only meaningful for `EntryKind::Task`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted organizer entry.
///
/// For tasks the due date serves as both `anchor_start` and `anchor_end`.
/// An entry carrying a recurrence rule is a template: queries with a time
/// window replace it with its expanded occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Storage-assigned identifier, immutable.
    pub id: i64,
    /// Opaque identifier of the owning account.
    pub owner_id: String,
    pub kind: EntryKind,
    pub title: String,
    pub description: Option<String>,
    pub anchor_start: DateTime<Utc>,
    pub anchor_end: DateTime<Utc>,
    /// iCalendar RRULE text; absent or blank means non-recurring.
    pub recurrence_rule: Option<String>,
    pub tags: BTreeSet<String>,
    pub status: Option<TaskStatus>,
}

impl Entry {
    /// Whether this entry is a recurring template (rule present and non-blank).
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.recurrence_rule
            .as_deref()
            .is_some_and(|rule| !rule.trim().is_empty())
    }

    /// Anchor duration, preserved across every expanded occurrence.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.anchor_end - self.anchor_start
    }

    /// ## Summary
    /// Checks the record invariants enforced at the storage-adapter boundary.
    ///
    /// ## Errors
    /// Returns an error when the title is blank or `anchor_end` precedes
    /// `anchor_start`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::ValidationError("title must not be empty".into()));
        }
        if self.anchor_end < self.anchor_start {
            return Err(CoreError::InvariantViolation(
                "anchor_end must not precede anchor_start",
            ));
        }
        Ok(())
    }
}

/// One concrete instance of a recurring entry's expansion.
///
/// Created transiently during a query and discarded after serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub source_entry_id: i64,
    pub owner_id: String,
    pub kind: EntryKind,
    pub title: String,
    pub description: Option<String>,
    pub occurrence_start: DateTime<Utc>,
    pub occurrence_end: DateTime<Utc>,
    pub tags: BTreeSet<String>,
    pub status: Option<TaskStatus>,
}

/// Uniform query result record.
///
/// Entries and occurrences collapse into the same shape so downstream
/// serialization does not need to distinguish them beyond `is_recurring`
/// and, for occurrences, `source_entry_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryItem {
    pub id: i64,
    pub owner_id: String,
    pub kind: EntryKind,
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub recurrence_rule: Option<String>,
    pub is_recurring: bool,
    pub source_entry_id: Option<i64>,
    pub tags: BTreeSet<String>,
    pub status: Option<TaskStatus>,
}

impl From<Entry> for QueryItem {
    fn from(entry: Entry) -> Self {
        let is_recurring = entry.is_recurring();
        Self {
            id: entry.id,
            owner_id: entry.owner_id,
            kind: entry.kind,
            title: entry.title,
            description: entry.description,
            start: entry.anchor_start,
            end: entry.anchor_end,
            recurrence_rule: entry.recurrence_rule,
            is_recurring,
            source_entry_id: None,
            tags: entry.tags,
            status: entry.status,
        }
    }
}

impl From<Occurrence> for QueryItem {
    fn from(occurrence: Occurrence) -> Self {
        Self {
            id: occurrence.source_entry_id,
            owner_id: occurrence.owner_id,
            kind: occurrence.kind,
            title: occurrence.title,
            description: occurrence.description,
            start: occurrence.occurrence_start,
            end: occurrence.occurrence_end,
            recurrence_rule: None,
            is_recurring: true,
            source_entry_id: Some(occurrence.source_entry_id),
            tags: occurrence.tags,
            status: occurrence.status,
        }
    }
}
