//! Entity parsers for shelf payloads
//!
//! Each parser takes an arbitrary JSON value and returns the typed record,
//! or `None` when a mandatory field cannot be resolved through any alias.
//! Malformed entries of collection fields are dropped, never nulled.

use serde_json::Value;

use super::{entries, resolve_number, resolve_string, FieldPath, RawObject};
use crate::models::shelf::{ShelfColumnPayload, ShelfRecord, ShelfUnitDetail, ShelfUnitPiece};

// ---------------------------------------------------------------------------
// Alias tables, highest priority first
// ---------------------------------------------------------------------------

pub(crate) mod fields {
    use crate::normalize::FieldPath::{self, Nested, Top};

    pub const PIECE_ID: &[FieldPath] = &[Top("id")];
    pub const PIECE_TYPE: &[FieldPath] = &[Top("type")];

    pub const COLUMN_ID: &[FieldPath] = &[Top("id")];
    pub const COLUMN_ELEMENTS: FieldPath = Top("elements");

    pub const SHELF_ID: &[FieldPath] = &[Top("id")];
    pub const SHELF_NAME: &[FieldPath] = &[Top("name")];
    pub const SHELF_BUILDING: &[FieldPath] =
        &[Top("building"), Top("building_name"), Top("buildingName")];
    pub const SHELF_ROOM: &[FieldPath] = &[Top("room"), Top("room_name"), Top("roomName")];
    pub const SHELF_NUM_ELEMENTS: &[FieldPath] = &[Top("numElements"), Top("num_elements")];
    pub const SHELF_COLUMNS: FieldPath = Top("columns");

    pub const UNIT_ID: &[FieldPath] = &[
        Top("unit_id"),
        Top("id"),
        Nested("shelf", "unit_id"),
        Nested("shelf", "id"),
    ];
    pub const UNIT_SHELF_ID: &[FieldPath] =
        &[Top("shelf_id"), Top("shelfId"), Nested("shelf", "id")];
    pub const UNIT_SHELF_NAME: &[FieldPath] =
        &[Top("shelf_name"), Top("shelfName"), Nested("shelf", "name")];
    pub const UNIT_BUILDING: &[FieldPath] = &[Top("building"), Nested("shelf", "building")];
    pub const UNIT_ROOM: &[FieldPath] = &[Top("room"), Nested("shelf", "room")];
    pub const UNIT_COLUMN_ID: &[FieldPath] =
        &[Top("column_id"), Top("columnId"), Nested("column", "id")];
    pub const UNIT_COLUMN_INDEX: &[FieldPath] = &[
        Top("column_index"),
        Top("columnIndex"),
        Nested("column", "index"),
    ];
    pub const UNIT_NUM_ELEMENTS: &[FieldPath] = &[
        Top("num_elements"),
        Top("numElements"),
        Nested("column", "num_elements"),
        Nested("column", "numElements"),
    ];
    pub const UNIT_TYPE: &[FieldPath] = &[Top("type"), Top("unit_type"), Top("unitType")];
}

/// Parse a shelf unit piece (`{ id, type }`)
pub fn parse_shelf_piece(value: &Value) -> Option<ShelfUnitPiece> {
    let raw = value.as_object()?;
    Some(ShelfUnitPiece {
        id: resolve_string(raw, fields::PIECE_ID)?,
        kind: resolve_string(raw, fields::PIECE_TYPE)?,
    })
}

/// Parse a shelf column, dropping malformed pieces
pub fn parse_shelf_column(value: &Value) -> Option<ShelfColumnPayload> {
    let raw = value.as_object()?;
    let id = resolve_string(raw, fields::COLUMN_ID)?;
    let elements = parse_all(raw, fields::COLUMN_ELEMENTS, parse_shelf_piece);
    Some(ShelfColumnPayload { id, elements })
}

/// Parse a shelf record; `id` and `name` are mandatory
pub fn parse_shelf_record(value: &Value) -> Option<ShelfRecord> {
    let raw = value.as_object()?;
    let id = resolve_string(raw, fields::SHELF_ID)?;
    let name = resolve_string(raw, fields::SHELF_NAME)?;

    Some(ShelfRecord {
        id,
        name,
        building: resolve_string(raw, fields::SHELF_BUILDING),
        room: resolve_string(raw, fields::SHELF_ROOM),
        num_elements: resolve_number(raw, fields::SHELF_NUM_ELEMENTS),
        columns: parse_all(raw, fields::SHELF_COLUMNS, parse_shelf_column),
    })
}

/// Parse a `GET /shelves` body. Non-array bodies yield an empty list.
pub fn parse_shelf_list(value: &Value) -> Vec<ShelfRecord> {
    let all = entries(Some(value));
    let shelves: Vec<ShelfRecord> = all.iter().filter_map(parse_shelf_record).collect();
    if shelves.len() < all.len() {
        tracing::debug!("Dropped {} malformed shelf entries", all.len() - shelves.len());
    }
    shelves
}

/// Parse a shelf unit detail; only `id` is mandatory
pub fn parse_shelf_unit_detail(value: &Value) -> Option<ShelfUnitDetail> {
    let raw = value.as_object()?;
    let id = resolve_string(raw, fields::UNIT_ID)?;

    Some(ShelfUnitDetail {
        id,
        shelf_id: resolve_string(raw, fields::UNIT_SHELF_ID),
        shelf_name: resolve_string(raw, fields::UNIT_SHELF_NAME),
        building: resolve_string(raw, fields::UNIT_BUILDING),
        room: resolve_string(raw, fields::UNIT_ROOM),
        column_id: resolve_string(raw, fields::UNIT_COLUMN_ID),
        column_index: resolve_number(raw, fields::UNIT_COLUMN_INDEX),
        num_elements: resolve_number(raw, fields::UNIT_NUM_ELEMENTS),
        kind: resolve_string(raw, fields::UNIT_TYPE),
    })
}

fn parse_all<T>(raw: &RawObject, path: FieldPath, parse: fn(&Value) -> Option<T>) -> Vec<T> {
    entries(path.lookup(raw)).iter().filter_map(parse).collect()
}
