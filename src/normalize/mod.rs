//! Defensive normalization of loosely-shaped JSON payloads
//!
//! Producers disagree on field names (snake_case vs camelCase) and on
//! shape (nested vs flattened). Every target field is therefore described
//! by an ordered list of [`FieldPath`]s; the first path whose normalized
//! value is present wins.

pub mod parser;

pub use parser::{
    parse_shelf_column, parse_shelf_list, parse_shelf_piece, parse_shelf_record,
    parse_shelf_unit_detail,
};

use serde_json::{Map, Value};

/// JSON object as seen by the parsers
pub type RawObject = Map<String, Value>;

/// Location of a candidate value inside a raw object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    /// `raw[key]`
    Top(&'static str),
    /// `raw[object][key]`, only when `raw[object]` is itself an object
    Nested(&'static str, &'static str),
}

impl FieldPath {
    /// Raw value at this path, if any
    pub fn lookup<'a>(&self, raw: &'a RawObject) -> Option<&'a Value> {
        match *self {
            FieldPath::Top(key) => raw.get(key),
            FieldPath::Nested(object, key) => raw.get(object)?.as_object()?.get(key),
        }
    }
}

/// Trimmed string, or `None` for non-strings and blank strings
pub fn normalize_string(value: Option<&Value>) -> Option<String> {
    let trimmed = value?.as_str()?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Integer from a finite JSON number or from a string with a leading
/// base-10 integer ("12", " -3", "7 units"). Everything else is `None`.
pub fn normalize_number(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                return Some(v);
            }
            // Large unsigned or fractional values
            let v = n.as_f64()?;
            if v.is_finite() && v.trunc() >= i64::MIN as f64 && v.trunc() <= i64::MAX as f64 {
                Some(v.trunc() as i64)
            } else {
                None
            }
        }
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

/// First alias in `paths` that yields a non-blank string
pub fn resolve_string(raw: &RawObject, paths: &[FieldPath]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| normalize_string(path.lookup(raw)))
}

/// First alias in `paths` that yields a number
pub fn resolve_number(raw: &RawObject, paths: &[FieldPath]) -> Option<i64> {
    paths
        .iter()
        .find_map(|path| normalize_number(path.lookup(raw)))
}

/// Entries of a collection field; anything but an array is empty
pub fn entries(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Parse the longest leading integer of `s`, after leading whitespace
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
