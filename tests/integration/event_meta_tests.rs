//! Derived event state from JSON events

use chrono::{TimeZone, Utc};
use serde_json::json;

use shelfsync::models::borrow::{Event, EventState};
use shelfsync::services::derive_event_meta_at;

fn event(items: serde_json::Value) -> Event {
    serde_json::from_value(json!({
        "id": "ev-1",
        "personId": "p-1",
        "createdAt": "2026-09-30T08:00:00Z",
        "state": "on_loan",
        "items": items
    }))
    .unwrap()
}

fn borrowed(id: &str, state: &str, due: &str) -> serde_json::Value {
    json!({
        "id": id,
        "itemId": format!("item-{}", id),
        "itemName": "Camera",
        "borrowDate": "2026-10-01",
        "dueDate": due,
        "returnDate": null,
        "state": state
    })
}

#[test]
fn test_event_meta_from_json() {
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();

    let returned = event(json!([
        borrowed("1", "returned", "2026-10-02"),
        borrowed("2", "returned", "2026-10-03")
    ]));
    let meta = derive_event_meta_at(&returned, now);
    assert_eq!((meta.overdue_count, meta.total_count), (0, 2));
    assert_eq!(meta.derived_state, EventState::Returned);

    let overdue = event(json!([
        borrowed("1", "on_loan", "2026-10-02"),
        borrowed("2", "overdue", "")
    ]));
    let meta = derive_event_meta_at(&overdue, now);
    assert_eq!(meta.overdue_count, 2);
    assert_eq!(meta.derived_state, EventState::Overdue);

    let partial = event(json!([
        borrowed("1", "on_loan", "2026-10-02T17:00:00+02:00"),
        borrowed("2", "on_loan", "2026-10-30")
    ]));
    let meta = derive_event_meta_at(&partial, now);
    assert_eq!(meta.overdue_count, 1);
    assert_eq!(meta.derived_state, EventState::PartialOverdue);

    let untouched = event(json!([borrowed("1", "approved", "tbd")]));
    assert_eq!(
        derive_event_meta_at(&untouched, now).derived_state,
        EventState::OnLoan
    );
}

#[test]
fn test_event_meta_serializes_camel_case() {
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
    let meta = derive_event_meta_at(&event(json!([borrowed("1", "on_loan", "2026-10-01")])), now);

    assert_eq!(
        serde_json::to_value(meta).unwrap(),
        json!({ "overdueCount": 1, "totalCount": 1, "derivedState": "overdue" })
    );
}
