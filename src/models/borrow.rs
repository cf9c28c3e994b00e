//! Borrow (loan) models: per-item records and the aggregate event

use serde::{Deserialize, Serialize};

/// State of a single borrowed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorrowState {
    Pending,
    Approved,
    Returned,
    Overdue,
    OnLoan,
}

impl std::fmt::Display for BorrowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BorrowState::Pending => "Pending",
            BorrowState::Approved => "Approved",
            BorrowState::Returned => "Returned",
            BorrowState::Overdue => "Overdue",
            BorrowState::OnLoan => "On loan",
        };
        write!(f, "{}", label)
    }
}

/// Aggregate state of a borrow event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventState {
    Pending,
    Approved,
    OnLoan,
    Overdue,
    Returned,
    PartialOverdue,
}

impl std::fmt::Display for EventState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EventState::Pending => "Pending",
            EventState::Approved => "Approved",
            EventState::OnLoan => "On loan",
            EventState::Overdue => "Overdue",
            EventState::Returned => "Returned",
            EventState::PartialOverdue => "Partial overdue",
        };
        write!(f, "{}", label)
    }
}

/// One borrowed item within an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowedList {
    pub id: String,
    pub item_id: String,
    pub item_name: String,
    pub borrow_date: String,
    /// Due date as sent by the server; may not be a valid date
    pub due_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    pub state: BorrowState,
}

/// Borrow request grouping several items for one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub person_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub state: EventState,
    #[serde(default)]
    pub items: Vec<BorrowedList>,
}

/// Overdue summary computed from an event's items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMeta {
    pub overdue_count: usize,
    pub total_count: usize,
    pub derived_state: EventState,
}
