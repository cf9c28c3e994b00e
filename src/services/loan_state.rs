//! Aggregate loan state of a borrow event
//!
//! Pure functions: the event is never modified, callers decide whether to
//! persist the derived state.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::borrow::{BorrowState, BorrowedList, Event, EventMeta, EventState};

/// Date-time layouts accepted for due dates without an offset (read as UTC)
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a due date: RFC 3339, a naive date-time, or a bare `YYYY-MM-DD`
/// (midnight UTC). Anything else is `None`.
pub fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Whether an item counts as overdue at `now`
///
/// Returned items never are. Items marked overdue always are. Otherwise
/// the due date must parse and lie strictly before `now`.
pub fn is_item_overdue(item: &BorrowedList, now: DateTime<Utc>) -> bool {
    match item.state {
        BorrowState::Returned => false,
        BorrowState::Overdue => true,
        _ => parse_due_date(&item.due_date).is_some_and(|due| due < now),
    }
}

/// Derive overdue count and aggregate state of `event` at `now`
pub fn derive_event_meta_at(event: &Event, now: DateTime<Utc>) -> EventMeta {
    let overdue_count = event
        .items
        .iter()
        .filter(|item| is_item_overdue(item, now))
        .count();
    let total_count = event.items.len();
    let all_returned =
        total_count > 0 && event.items.iter().all(|item| item.state == BorrowState::Returned);

    // returned > overdue > partial_overdue > stored state
    let derived_state = if all_returned {
        EventState::Returned
    } else if total_count > 0 && overdue_count == total_count {
        EventState::Overdue
    } else if overdue_count > 0 {
        EventState::PartialOverdue
    } else {
        event.state
    };

    EventMeta {
        overdue_count,
        total_count,
        derived_state,
    }
}

/// Derive overdue count and aggregate state of `event` now
pub fn derive_event_meta(event: &Event) -> EventMeta {
    derive_event_meta_at(event, Utc::now())
}
