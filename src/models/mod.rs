//! Data models for shelfsync

pub mod borrow;
pub mod shelf;

// Re-export commonly used types
pub use borrow::{BorrowState, BorrowedList, Event, EventMeta, EventState};
pub use shelf::{
    CreateShelfPayload, ShelfColumnPayload, ShelfRecord, ShelfUnitDetail, ShelfUnitPiece,
};
