//! Storage collaborator boundary.
//!
//! The query core never touches a connection or builds SQL itself; it is
//! handed an [`EntryStore`] and issues the three fetch shapes the
//! orchestrator needs. Predicates passed down here are best-effort
//! pushdown hints - the orchestrator re-applies them in memory on the
//! windowed path, so a backend that cannot express a predicate may
//! over-fetch but must never under-fetch.

use organizr_core::model::{Entry, EntryKind};
use thiserror::Error;

use crate::query::filter::FilterSet;
use crate::query::window::TimeWindow;

/// Storage-layer errors, propagated unmodified through the query core.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read access to persisted entries for one owner and entry kind.
///
/// Implementations must be safe to call concurrently; the core holds no
/// cross-call state and never retries a failed fetch.
pub trait EntryStore {
    /// Fetches non-recurring entries with both predicates and the time
    /// window pushed down (inclusive interval overlap on the anchors).
    fn fetch_non_recurring(
        &self,
        owner_id: &str,
        kind: EntryKind,
        filters: &FilterSet,
        window: &TimeWindow,
    ) -> impl Future<Output = StoreResult<Vec<Entry>>>;

    /// Fetches recurring-template entries with predicates only. The
    /// window is deliberately not applied: storage cannot evaluate a
    /// recurrence rule, so every candidate template must come back.
    fn fetch_recurring_templates(
        &self,
        owner_id: &str,
        kind: EntryKind,
        filters: &FilterSet,
    ) -> impl Future<Output = StoreResult<Vec<Entry>>>;

    /// Fetches all entries matching the predicates, recurring templates
    /// included in template form. Used by the no-window path.
    fn fetch_all(
        &self,
        owner_id: &str,
        kind: EntryKind,
        filters: &FilterSet,
    ) -> impl Future<Output = StoreResult<Vec<Entry>>>;
}
