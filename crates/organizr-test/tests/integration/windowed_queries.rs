//! Windowed query behavior over non-recurring entries.

use super::helpers::{OWNER, at, event, service, task, window};
use organizr_core::model::EntryKind;
use organizr_service::error::ServiceError;
use organizr_service::query::filter::FilterSet;
use organizr_service::query::window::TimeWindow;
use organizr_test::FailingStore;
use organizr_service::query::{QueryOptions, QueryService};

#[test_log::test(tokio::test)]
async fn overlapping_entries_appear_exactly_once() {
    let svc = service(vec![
        event(1, "inside", at(10, 9), 1),
        event(2, "before window", at(1, 9), 1),
        event(3, "after window", at(25, 9), 1),
        // Starts before the window but reaches into it.
        event(4, "spans start", at(8, 23), 12),
    ]);

    let items = svc
        .query(
            OWNER,
            EntryKind::Event,
            &FilterSet::default(),
            Some(window(at(9, 0), at(20, 0))),
        )
        .await
        .expect("query succeeds");

    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![4, 1]);
}

#[test_log::test(tokio::test)]
async fn window_bounds_are_inclusive() {
    let svc = service(vec![
        // Ends exactly at the window start.
        event(1, "ends at start", at(9, 0), 1),
        // Starts exactly at the window end.
        event(2, "starts at end", at(12, 0), 1),
    ]);

    let items = svc
        .query(
            OWNER,
            EntryKind::Event,
            &FilterSet::default(),
            Some(window(at(9, 1), at(12, 0))),
        )
        .await
        .expect("query succeeds");

    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test_log::test(tokio::test)]
async fn results_sort_by_start_then_id() {
    let svc = service(vec![
        event(5, "later", at(12, 0), 1),
        event(3, "same instant, higher id", at(10, 0), 1),
        event(2, "same instant, lower id", at(10, 0), 1),
    ]);

    let items = svc
        .query(
            OWNER,
            EntryKind::Event,
            &FilterSet::default(),
            Some(window(at(9, 0), at(20, 0))),
        )
        .await
        .expect("query succeeds");

    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![2, 3, 5]);
}

#[test_log::test(tokio::test)]
async fn query_is_idempotent() {
    let svc = service(vec![
        event(1, "a", at(10, 9), 1),
        event(2, "b", at(11, 9), 1),
        task(3, "c", at(12, 9)),
    ]);

    let filters = FilterSet::default();
    let run = || {
        svc.query(
            OWNER,
            EntryKind::Event,
            &filters,
            Some(window(at(9, 0), at(20, 0))),
        )
    };

    let first = run().await.expect("first run succeeds");
    let second = run().await.expect("second run succeeds");
    assert_eq!(first, second);
}

#[test_log::test(tokio::test)]
async fn entry_kinds_do_not_mix() {
    let svc = service(vec![event(1, "event", at(10, 9), 1), task(2, "task", at(10, 9))]);

    let events = svc
        .query(
            OWNER,
            EntryKind::Event,
            &FilterSet::default(),
            Some(window(at(9, 0), at(20, 0))),
        )
        .await
        .expect("query succeeds");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EntryKind::Event);

    let tasks = svc
        .query(
            OWNER,
            EntryKind::Task,
            &FilterSet::default(),
            Some(window(at(9, 0), at(20, 0))),
        )
        .await
        .expect("query succeeds");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].kind, EntryKind::Task);
}

#[test_log::test(tokio::test)]
async fn other_owners_entries_are_invisible() {
    let mut foreign = event(9, "not yours", at(10, 9), 1);
    foreign.owner_id = "owner-2".to_owned();
    let svc = service(vec![event(1, "mine", at(10, 9), 1), foreign]);

    let items = svc
        .query(
            OWNER,
            EntryKind::Event,
            &FilterSet::default(),
            Some(window(at(9, 0), at(20, 0))),
        )
        .await
        .expect("query succeeds");

    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1]);
}

#[test_log::test(tokio::test)]
async fn invalid_window_is_rejected_before_any_fetch() {
    let result = TimeWindow::new(Some(at(12, 0)), Some(at(9, 0)));
    assert!(matches!(result, Err(ServiceError::InvalidWindow { .. })));
}

#[test_log::test(tokio::test)]
async fn storage_failure_aborts_the_query() {
    let svc = QueryService::new(FailingStore, QueryOptions::default());
    let result = svc
        .query(
            OWNER,
            EntryKind::Event,
            &FilterSet::default(),
            Some(window(at(9, 0), at(20, 0))),
        )
        .await;
    assert!(matches!(result, Err(ServiceError::StoreError(_))));
}
