//! Row identifiers shown in navigation previews.

use crate::data::label::strip_parenthetical;
use crate::data::{Column, Row};

/// Keys tried, in order, when no preferred key applies.
pub const IDENTIFIER_KEYS: [&str; 4] = ["id", "name", "title", "key"];

/// Derive one display identifier per row.
///
/// The value comes from `preferred_key` when the row has it, else from the
/// first of [`IDENTIFIER_KEYS`] present in the row, else from the first
/// visible column. It is then truncated at the first `(`.
pub fn derive_identifiers(
    rows: &[Row],
    visible_columns: &[Column],
    preferred_key: Option<&str>,
) -> Vec<String> {
    let first_visible = visible_columns.first().map(|c| c.key.as_str());
    rows.iter()
        .map(|row| row_identifier(row, first_visible, preferred_key))
        .collect()
}

fn row_identifier(row: &Row, first_visible: Option<&str>, preferred_key: Option<&str>) -> String {
    let key = preferred_key
        .filter(|k| row.contains_key(k))
        .or_else(|| IDENTIFIER_KEYS.iter().copied().find(|k| row.contains_key(k)))
        .or_else(|| first_visible.filter(|k| row.contains_key(k)));

    match key {
        Some(key) => strip_parenthetical(&row.value(key).to_string()).to_string(),
        None => String::new(),
    }
}
