//! Shelf, shelf column and shelf unit models

use serde::{Deserialize, Serialize};

/// One item stored in a shelf column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfUnitPiece {
    pub id: String,
    /// Piece type as sent by the server ("slim", "high", or anything else)
    #[serde(rename = "type")]
    pub kind: String,
}

impl ShelfUnitPiece {
    /// Catalog entry for this piece, if its type is a known one
    pub fn element_type(&self) -> Option<ShelfElementType> {
        ShelfElementType::from_type(&self.kind)
    }
}

/// A column of a shelf with its stacked pieces, bottom first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfColumnPayload {
    pub id: String,
    pub elements: Vec<ShelfUnitPiece>,
}

/// Shelf as returned by `GET /shelves`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfRecord {
    pub id: String,
    pub name: String,
    pub building: Option<String>,
    pub room: Option<String>,
    pub num_elements: Option<i64>,
    pub columns: Vec<ShelfColumnPayload>,
}

/// Location details of a single shelf unit, as returned by `GET /shelves/unit/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfUnitDetail {
    pub id: String,
    pub shelf_id: Option<String>,
    pub shelf_name: Option<String>,
    pub building: Option<String>,
    pub room: Option<String>,
    pub column_id: Option<String>,
    pub column_index: Option<i64>,
    pub num_elements: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// ---------------------------------------------------------------------------
// Shelf builder
// ---------------------------------------------------------------------------

/// Known shelf element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShelfElementType {
    Slim,
    High,
}

impl ShelfElementType {
    pub fn from_type(value: &str) -> Option<Self> {
        match value {
            "slim" => Some(ShelfElementType::Slim),
            "high" => Some(ShelfElementType::High),
            _ => None,
        }
    }

    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            ShelfElementType::Slim => "slim",
            ShelfElementType::High => "high",
        }
    }

    /// Height expressed in base units
    pub fn height_units(&self) -> u32 {
        match self {
            ShelfElementType::Slim => 1,
            ShelfElementType::High => 2,
        }
    }
}

impl std::fmt::Display for ShelfElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ShelfElementType::Slim => "Short Element",
            ShelfElementType::High => "Tall Element",
        };
        write!(f, "{}", label)
    }
}

/// Element placed in a column of the shelf editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfElement {
    pub id: String,
    pub kind: ShelfElementType,
    /// Number of inventory items shown on the element (editor only)
    pub num_items: Option<u32>,
}

/// Column of the shelf editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfColumn {
    pub id: String,
    pub elements: Vec<ShelfElement>,
}

/// Create shelf request body for `POST /shelves`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateShelfPayload {
    pub id: String,
    pub name: String,
    pub building: String,
    pub room: String,
    pub columns: Vec<ShelfColumnPayload>,
}

/// Strip editor-only fields from columns, keeping the wire shape
pub fn serialize_columns(columns: &[ShelfColumn]) -> Vec<ShelfColumnPayload> {
    columns
        .iter()
        .map(|column| ShelfColumnPayload {
            id: column.id.clone(),
            elements: column
                .elements
                .iter()
                .map(|element| ShelfUnitPiece {
                    id: element.id.clone(),
                    kind: element.kind.as_str().to_string(),
                })
                .collect(),
        })
        .collect()
}
