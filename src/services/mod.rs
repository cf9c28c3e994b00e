//! Client-side services built on the transport and the normalizer

pub mod loan_state;
pub mod shelves;
pub mod unit_cache;

pub use loan_state::{derive_event_meta, derive_event_meta_at, is_item_overdue};
pub use shelves::{FetchShelvesOptions, ShelvesClient};
pub use unit_cache::{CachePolicy, UnitCache, UnitLookup};
