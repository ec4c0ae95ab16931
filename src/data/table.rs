//! Table structures: columns, rows and the loaded dataset.

use super::label::humanize;
use super::{CellValue, ColumnShading};
use std::collections::HashMap;
use std::path::PathBuf;

static NULL_CELL: CellValue = CellValue::Null;

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Stable key into row data.
    pub key: String,
    /// Display name.
    pub label: String,
    /// Explicit visibility override; `None` leaves it to the layout.
    pub visible: Option<bool>,
    /// Optional styling hints.
    pub shading: Option<ColumnShading>,
}

impl Column {
    /// Create a column whose label is derived from its key.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: humanize(&key),
            key,
            visible: None,
            shading: None,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the visibility override.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Check whether the column was explicitly hidden.
    pub fn is_hidden(&self) -> bool {
        self.visible == Some(false)
    }
}

/// A table row: column key to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(key.into(), value.into());
    }

    /// Builder-style [`Row::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a cell value, if the key is present.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    /// Get a cell value, reading absent keys as null.
    pub fn value(&self, key: &str) -> &CellValue {
        self.cells.get(key).unwrap_or(&NULL_CELL)
    }

    /// Check if the row has a key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// Iterate over all values.
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.values()
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A loaded table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Table title.
    pub title: String,
    /// Source file, if loaded from disk.
    pub source: Option<PathBuf>,
    /// Column definitions in display order.
    pub columns: Vec<Column>,
    /// Rows in source order.
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset from rows, deriving columns from `keys`.
    pub fn new(title: impl Into<String>, keys: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            title: title.into(),
            source: None,
            columns: keys.into_iter().map(Column::new).collect(),
            rows,
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_read_as_null() {
        let row = Row::new().with("name", "Eggs");
        assert_eq!(row.value("name"), &CellValue::from("Eggs"));
        assert_eq!(row.value("missing"), &CellValue::Null);
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn columns_get_humanized_labels() {
        let dataset = Dataset::new("t", vec!["firstName".into(), "id".into()], Vec::new());
        assert_eq!(dataset.columns[0].label, "First Name");
        assert_eq!(dataset.columns[1].label, "Id");
        assert!(dataset.is_empty());
    }
}
