//! Integration tests for the shelfsync client

mod fake;
mod unit_lookup_tests;
mod event_meta_tests;
