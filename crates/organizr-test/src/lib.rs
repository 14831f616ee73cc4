//! Organizr personal-organizer backend - integration test support.
//!
//! Re-exports the workspace crates and provides an in-memory
//! [`MemoryStore`] so the query core can be exercised without a
//! database.

pub use organizr_core;
pub use organizr_service;

use organizr_core::model::{Entry, EntryKind, QueryItem};
use organizr_service::query::filter::FilterSet;
use organizr_service::query::window::TimeWindow;
use organizr_service::store::{EntryStore, StoreError, StoreResult};

/// In-memory [`EntryStore`] backed by a plain entry list.
///
/// Predicate and window pushdown are simulated with the same evaluator
/// the orchestrator uses in memory, which is exactly the contract the
/// trait asks of a SQL backend: it may over-fetch, never under-fetch.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<Entry>,
}

impl MemoryStore {
    /// ## Summary
    /// Builds a store over the given entries, enforcing the record
    /// invariants the storage-adapter boundary is responsible for.
    ///
    /// ## Errors
    /// Returns an error when any entry fails validation.
    pub fn new(entries: Vec<Entry>) -> StoreResult<Self> {
        for entry in &entries {
            entry
                .validate()
                .map_err(|err| StoreError::Backend(anyhow::anyhow!(err)))?;
        }
        Ok(Self { entries })
    }

    fn select(
        &self,
        owner_id: &str,
        kind: EntryKind,
        filters: &FilterSet,
        recurring: Option<bool>,
        window: Option<&TimeWindow>,
    ) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.owner_id == owner_id && entry.kind == kind)
            .filter(|entry| recurring.is_none_or(|want| entry.is_recurring() == want))
            .filter(|entry| {
                window.is_none_or(|w| w.overlaps(entry.anchor_start, entry.anchor_end))
            })
            .filter(|entry| filters.matches(&QueryItem::from((*entry).clone())))
            .cloned()
            .collect()
    }
}

impl EntryStore for MemoryStore {
    async fn fetch_non_recurring(
        &self,
        owner_id: &str,
        kind: EntryKind,
        filters: &FilterSet,
        window: &TimeWindow,
    ) -> StoreResult<Vec<Entry>> {
        Ok(self.select(owner_id, kind, filters, Some(false), Some(window)))
    }

    async fn fetch_recurring_templates(
        &self,
        owner_id: &str,
        kind: EntryKind,
        filters: &FilterSet,
    ) -> StoreResult<Vec<Entry>> {
        Ok(self.select(owner_id, kind, filters, Some(true), None))
    }

    async fn fetch_all(
        &self,
        owner_id: &str,
        kind: EntryKind,
        filters: &FilterSet,
    ) -> StoreResult<Vec<Entry>> {
        Ok(self.select(owner_id, kind, filters, None, None))
    }
}

/// Storage collaborator that fails every fetch, for error-path tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl EntryStore for FailingStore {
    async fn fetch_non_recurring(
        &self,
        _owner_id: &str,
        _kind: EntryKind,
        _filters: &FilterSet,
        _window: &TimeWindow,
    ) -> StoreResult<Vec<Entry>> {
        Err(StoreError::Backend(anyhow::anyhow!("connection refused")))
    }

    async fn fetch_recurring_templates(
        &self,
        _owner_id: &str,
        _kind: EntryKind,
        _filters: &FilterSet,
    ) -> StoreResult<Vec<Entry>> {
        Err(StoreError::Backend(anyhow::anyhow!("connection refused")))
    }

    async fn fetch_all(
        &self,
        _owner_id: &str,
        _kind: EntryKind,
        _filters: &FilterSet,
    ) -> StoreResult<Vec<Entry>> {
        Err(StoreError::Backend(anyhow::anyhow!("connection refused")))
    }
}
