//! Query orchestration.
//!
//! One orchestrator serves every entry kind; the per-request state
//! machine is: validate, pick the no-window or windowed path, expand
//! recurring templates, re-apply filters in memory, merge and sort.
//! Storage failures abort the query; a single bad recurring series is
//! logged and skipped so it cannot fail a whole list request.

pub mod filter;
pub mod merge;
pub mod window;

use organizr_core::config::Settings;
use organizr_core::model::{EntryKind, QueryItem};

use crate::error::{ServiceError, ServiceResult};
use crate::recurrence;
use crate::store::EntryStore;
use filter::FilterSet;
use window::TimeWindow;

/// Per-service expansion knobs, usually derived from [`Settings`].
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// Hard cap on occurrences produced per recurring series.
    pub expansion_limit: u16,
    /// Civil timezone recurrence rules are evaluated in.
    pub timezone: chrono_tz::Tz,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            expansion_limit: u16::MAX,
            timezone: chrono_tz::UTC,
        }
    }
}

impl QueryOptions {
    /// ## Summary
    /// Derives query options from loaded settings.
    ///
    /// ## Errors
    /// Returns an error when the configured timezone name is unknown.
    pub fn from_settings(settings: &Settings) -> ServiceResult<Self> {
        Ok(Self {
            expansion_limit: settings.query.expansion_limit,
            timezone: settings.time.civil_tz()?,
        })
    }
}

/// Read-only query facade over an injected [`EntryStore`].
///
/// Holds no cross-call state; safe to share across concurrent callers.
#[derive(Debug, Clone)]
pub struct QueryService<S> {
    store: S,
    options: QueryOptions,
}

impl<S: EntryStore> QueryService<S> {
    pub const fn new(store: S, options: QueryOptions) -> Self {
        Self { store, options }
    }

    /// ## Summary
    /// Executes one query for an owner and entry kind.
    ///
    /// Without a window, entries come back as stored - recurring
    /// templates in template form, since expansion without a bound is
    /// meaningless. With a window, non-recurring entries are fetched
    /// window-filtered, recurring templates are expanded into concrete
    /// occurrences, filters are re-applied in memory to both sets, and
    /// the merged result is sorted by `(start, id)`.
    ///
    /// ## Errors
    /// Returns [`ServiceError::NoFilterProvided`] when neither a filter
    /// dimension nor a window is present, and propagates storage errors
    /// unmodified. Per-series expansion failures are logged and skipped,
    /// never surfaced.
    pub async fn query(
        &self,
        owner_id: &str,
        kind: EntryKind,
        filters: &FilterSet,
        window: Option<TimeWindow>,
    ) -> ServiceResult<Vec<QueryItem>> {
        if !filters.has_dimensions() && window.is_none() {
            return Err(ServiceError::NoFilterProvided);
        }

        match window {
            None => self.query_without_window(owner_id, kind, filters).await,
            Some(window) => self.query_windowed(owner_id, kind, filters, &window).await,
        }
    }

    async fn query_without_window(
        &self,
        owner_id: &str,
        kind: EntryKind,
        filters: &FilterSet,
    ) -> ServiceResult<Vec<QueryItem>> {
        let entries = self.store.fetch_all(owner_id, kind, filters).await?;
        tracing::debug!(
            owner_id,
            kind = %kind,
            fetched = entries.len(),
            "executing query without window"
        );

        let items: Vec<QueryItem> = entries
            .into_iter()
            .map(QueryItem::from)
            .filter(|item| filters.matches(item))
            .collect();
        Ok(merge::merge(items, Vec::new()))
    }

    async fn query_windowed(
        &self,
        owner_id: &str,
        kind: EntryKind,
        filters: &FilterSet,
        window: &TimeWindow,
    ) -> ServiceResult<Vec<QueryItem>> {
        let (plain, templates) = tokio::try_join!(
            self.store
                .fetch_non_recurring(owner_id, kind, filters, window),
            self.store.fetch_recurring_templates(owner_id, kind, filters),
        )?;
        tracing::debug!(
            owner_id,
            kind = %kind,
            non_recurring = plain.len(),
            templates = templates.len(),
            "executing windowed query"
        );

        let mut occurrences: Vec<QueryItem> = Vec::new();
        for template in templates {
            match recurrence::expand(
                &template,
                window,
                self.options.timezone,
                self.options.expansion_limit,
            ) {
                Ok(expanded) => occurrences.extend(expanded.into_iter().map(QueryItem::from)),
                Err(err) => {
                    tracing::warn!(
                        entry_id = template.id,
                        error = %err,
                        "skipping recurring series that failed to expand"
                    );
                }
            }
        }

        // In-memory re-validation is mandatory: OR-mode combination plus
        // window exclusion cannot be pushed down safely, and expanded
        // occurrences never existed in storage at all.
        let non_recurring: Vec<QueryItem> = plain
            .into_iter()
            .map(QueryItem::from)
            .filter(|item| window.overlaps(item.start, item.end))
            .filter(|item| filters.matches(item))
            .collect();
        let occurrences: Vec<QueryItem> = occurrences
            .into_iter()
            .filter(|item| filters.matches(item))
            .collect();

        Ok(merge::merge(non_recurring, occurrences))
    }
}
