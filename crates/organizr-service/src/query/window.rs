//! Query time window.

use chrono::{DateTime, Utc};

use crate::error::{ServiceError, ServiceResult};

/// A validated query time range.
///
/// Bounds default to the earliest/latest representable instants, so a
/// half-open request ("everything after T") is still a window. Overlap
/// checks are inclusive on both ends, matching how non-recurring entries
/// are windowed in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// ## Summary
    /// Builds a window from optional bounds, defaulting missing bounds to
    /// the representable extremes.
    ///
    /// ## Errors
    /// Returns [`ServiceError::InvalidWindow`] when `end <= start`.
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> ServiceResult<Self> {
        let start = start.unwrap_or(DateTime::<Utc>::MIN_UTC);
        let end = end.unwrap_or(DateTime::<Utc>::MAX_UTC);
        if end <= start {
            return Err(ServiceError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Inclusive interval overlap: an item is in the window iff it starts
    /// no later than the window end and ends no earlier than the window
    /// start.
    #[must_use]
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start <= self.end && end >= self.start
    }
}
