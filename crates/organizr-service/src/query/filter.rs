//! Stateless predicate evaluation over query result records.
//!
//! The same `FilterSet` is handed to the storage layer as a pushdown
//! hint and re-evaluated here in memory. In-memory evaluation is the
//! source of truth: it is mandatory for expanded occurrences (their
//! concrete instances do not exist in storage) and guards against
//! pushdown gaps for everything else.

use std::collections::BTreeSet;

use organizr_core::model::{QueryItem, TaskStatus};
use serde::{Deserialize, Serialize};

/// How the present filter dimensions combine.
///
/// Optional filters narrow the result in `And` mode and add alternatives
/// in `Or` mode. A dimension absent from the request never contributes a
/// verdict in either mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    And,
    Or,
}

/// Text, tag, and status predicates for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Case-insensitive substring matched against title or description.
    pub text: Option<String>,
    pub tags: BTreeSet<String>,
    pub status: Option<TaskStatus>,
    pub match_mode: MatchMode,
}

impl FilterSet {
    /// Whether any filter dimension is set. Blank text counts as absent.
    #[must_use]
    pub fn has_dimensions(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
            || !self.tags.is_empty()
            || self.status.is_some()
    }

    /// ## Summary
    /// Evaluates this filter set against one result record.
    ///
    /// Each present dimension produces a verdict; `And` requires all of
    /// them to hold, `Or` at least one. With no dimensions present every
    /// item matches, leaving the time window as the only constraint.
    #[must_use]
    pub fn matches(&self, item: &QueryItem) -> bool {
        let mut verdicts = Vec::with_capacity(3);

        if let Some(text) = self.text.as_deref().filter(|t| !t.trim().is_empty()) {
            verdicts.push(text_matches(text, item));
        }

        if !self.tags.is_empty() {
            let verdict = match self.match_mode {
                MatchMode::And => self.tags.iter().all(|tag| item.tags.contains(tag)),
                MatchMode::Or => self.tags.iter().any(|tag| item.tags.contains(tag)),
            };
            verdicts.push(verdict);
        }

        if let Some(status) = self.status {
            verdicts.push(item.status == Some(status));
        }

        if verdicts.is_empty() {
            return true;
        }

        match self.match_mode {
            MatchMode::And => verdicts.iter().all(|v| *v),
            MatchMode::Or => verdicts.iter().any(|v| *v),
        }
    }
}

fn text_matches(needle: &str, item: &QueryItem) -> bool {
    let needle = needle.to_lowercase();
    if item.title.to_lowercase().contains(&needle) {
        return true;
    }
    item.description
        .as_deref()
        .is_some_and(|description| description.to_lowercase().contains(&needle))
}
