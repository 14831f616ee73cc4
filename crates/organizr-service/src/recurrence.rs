//! Recurrence rule validation and series expansion.
//!
//! Rule text is stored in iCalendar RRULE grammar. `validate_rule` gives
//! write paths an immediate parse-time rejection; `expand` materializes
//! the occurrences of one template that intersect a query window. Both
//! go through the same `build_rule_set` so they accept and reject
//! identically.

use chrono::{DateTime, TimeDelta, Utc};
use organizr_core::model::{Entry, Occurrence};
use rrule::{RRule, RRuleSet, Tz, Unvalidated};

use crate::error::{ServiceError, ServiceResult};
use crate::query::window::TimeWindow;

/// ## Summary
/// Validates recurrence rule text without expanding it.
///
/// Intended for create/update paths, where a malformed rule must be
/// rejected before it is persisted. The rule is built against a fixed
/// reference anchor; validity does not depend on the anchor instant.
///
/// ## Errors
/// Returns [`ServiceError::InvalidRule`] when the text is blank, FREQ is
/// missing or unrecognized, any part fails to parse, or COUNT and UNTIL
/// are both present (RFC 5545 declares them mutually exclusive).
pub fn validate_rule(rule_text: &str) -> ServiceResult<()> {
    let dtstart = DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Tz::UTC);
    build_rule_set(rule_text, dtstart).map(|_| ())
}

/// ## Summary
/// Parses rule text and builds a validated rule set anchored at `dtstart`.
///
/// ## Errors
/// Returns [`ServiceError::InvalidRule`] on any parse or build failure.
pub fn build_rule_set(rule_text: &str, dtstart: DateTime<Tz>) -> ServiceResult<RRuleSet> {
    let trimmed = rule_text.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidRule("rule text is empty".to_owned()));
    }
    if has_part(trimmed, "COUNT") && has_part(trimmed, "UNTIL") {
        return Err(ServiceError::InvalidRule(
            "COUNT and UNTIL are mutually exclusive".to_owned(),
        ));
    }

    let rrule = trimmed
        .parse::<RRule<Unvalidated>>()
        .map_err(|err| ServiceError::InvalidRule(err.to_string()))?;
    rrule
        .build(dtstart)
        .map_err(|err| ServiceError::InvalidRule(err.to_string()))
}

fn has_part(rule_text: &str, name: &str) -> bool {
    rule_text.split(';').any(|part| {
        part.trim()
            .split_once('=')
            .is_some_and(|(key, _)| key.trim().eq_ignore_ascii_case(name))
    })
}

/// ## Summary
/// Expands one recurring template into the occurrences intersecting the
/// window.
///
/// The anchor duration is preserved: every occurrence ends
/// `anchor_end - anchor_start` after it starts. Candidate generation is
/// bounded around the window (padded by the duration so an occurrence
/// that started before the window but reaches into it is not missed)
/// and stops at COUNT/UNTIL exhaustion or at `limit` occurrences; exact
/// inclusion is then decided by the same inclusive interval overlap used
/// for non-recurring entries. The anchor instance appears iff the rule
/// itself generates it.
///
/// Expansion runs in the deployment civil timezone so day-based rules
/// track local days.
///
/// ## Errors
/// Returns [`ServiceError::InvalidRule`] for malformed rule text and a
/// core validation error for an invalid anchor. Callers on the query
/// path treat any error here as a per-series failure: log and skip.
pub fn expand(
    entry: &Entry,
    window: &TimeWindow,
    civil_tz: chrono_tz::Tz,
    limit: u16,
) -> ServiceResult<Vec<Occurrence>> {
    let Some(rule_text) = entry
        .recurrence_rule
        .as_deref()
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
    else {
        tracing::trace!(entry_id = entry.id, "entry has no recurrence rule");
        return Ok(Vec::new());
    };

    entry.validate()?;
    let duration = entry.duration();
    let tz = Tz::Tz(civil_tz);
    let dtstart = entry.anchor_start.with_timezone(&tz);
    let mut rrule_set = build_rule_set(rule_text, dtstart)?;

    // One second of slack on either side keeps the cursor bounds
    // inclusive regardless of how the rule iterator treats its limits;
    // the overlap check below is authoritative.
    let pad = duration + TimeDelta::seconds(1);
    if let Some(lower) = window.start().checked_sub_signed(pad) {
        if lower > DateTime::<Utc>::MIN_UTC {
            rrule_set = rrule_set.after(lower.with_timezone(&tz));
        }
    }
    if let Some(upper) = window.end().checked_add_signed(TimeDelta::seconds(1)) {
        if upper < DateTime::<Utc>::MAX_UTC {
            rrule_set = rrule_set.before(upper.with_timezone(&tz));
        }
    }

    let result = rrule_set.all(limit);
    if result.limited {
        tracing::warn!(
            entry_id = entry.id,
            limit,
            "occurrence generation truncated at the expansion limit"
        );
    }

    let mut occurrences = Vec::with_capacity(result.dates.len());
    for candidate in result.dates {
        let occurrence_start = candidate.with_timezone(&Utc);
        let Some(occurrence_end) = occurrence_start.checked_add_signed(duration) else {
            continue;
        };
        if !window.overlaps(occurrence_start, occurrence_end) {
            continue;
        }
        occurrences.push(Occurrence {
            source_entry_id: entry.id,
            owner_id: entry.owner_id.clone(),
            kind: entry.kind,
            title: entry.title.clone(),
            description: entry.description.clone(),
            occurrence_start,
            occurrence_end,
            tags: entry.tags.clone(),
            status: entry.status,
        });
    }

    tracing::debug!(
        entry_id = entry.id,
        count = occurrences.len(),
        "expanded recurring series"
    );
    Ok(occurrences)
}
