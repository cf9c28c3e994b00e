//! Shelfsync
//!
//! Client-side data layer for the inventory service: defensive parsing of
//! shelf payloads, deduplicated shelf unit lookups, and derivation of the
//! aggregate state of borrow events.

pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod services;
pub mod transport;

pub use config::AppConfig;
pub use error::{ClientError, ClientResult};
pub use services::{derive_event_meta, FetchShelvesOptions, ShelvesClient, UnitLookup};
