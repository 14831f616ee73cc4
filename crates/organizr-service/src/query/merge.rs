//! Combining non-recurring entries with expanded occurrences.

use organizr_core::model::QueryItem;

/// ## Summary
/// Concatenates the two result sets and sorts by `(start, id)`.
///
/// The sort is stable and ties break on the source entry id. No
/// deduplication is needed: the non-recurring fetch excludes templates
/// and the template fetch excludes non-recurring rows, so the sets are
/// disjoint by construction.
#[must_use]
pub fn merge(non_recurring: Vec<QueryItem>, occurrences: Vec<QueryItem>) -> Vec<QueryItem> {
    let mut items = non_recurring;
    items.extend(occurrences);
    items.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    items
}
