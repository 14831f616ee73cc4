#![allow(clippy::expect_used, dead_code)]
//! Fixture builders shared by the integration suites.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use organizr_core::model::{Entry, EntryKind, TaskStatus};
use organizr_service::query::window::TimeWindow;
use organizr_service::query::{QueryOptions, QueryService};
use organizr_test::MemoryStore;

pub const OWNER: &str = "owner-1";

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, day, hour, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn event(id: i64, title: &str, start: DateTime<Utc>, hours: i64) -> Entry {
    Entry {
        id,
        owner_id: OWNER.to_owned(),
        kind: EntryKind::Event,
        title: title.to_owned(),
        description: None,
        anchor_start: start,
        anchor_end: start + TimeDelta::hours(hours),
        recurrence_rule: None,
        tags: BTreeSet::new(),
        status: None,
    }
}

pub fn recurring_event(
    id: i64,
    title: &str,
    start: DateTime<Utc>,
    hours: i64,
    rule: &str,
) -> Entry {
    Entry {
        recurrence_rule: Some(rule.to_owned()),
        ..event(id, title, start, hours)
    }
}

pub fn task(id: i64, title: &str, due: DateTime<Utc>) -> Entry {
    Entry {
        id,
        owner_id: OWNER.to_owned(),
        kind: EntryKind::Task,
        title: title.to_owned(),
        description: None,
        anchor_start: due,
        anchor_end: due,
        recurrence_rule: None,
        tags: BTreeSet::new(),
        status: Some(TaskStatus::Pending),
    }
}

pub fn tagged(entry: Entry, tags: &[&str]) -> Entry {
    Entry {
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        ..entry
    }
}

pub fn described(entry: Entry, description: &str) -> Entry {
    Entry {
        description: Some(description.to_owned()),
        ..entry
    }
}

pub fn service(entries: Vec<Entry>) -> QueryService<MemoryStore> {
    let store = MemoryStore::new(entries).expect("valid fixture entries");
    QueryService::new(store, QueryOptions::default())
}

pub fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeWindow {
    TimeWindow::new(Some(start), Some(end)).expect("valid fixture window")
}
