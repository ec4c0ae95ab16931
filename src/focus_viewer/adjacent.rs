//! Current and neighbouring cell resolution.
//!
//! Both resolvers read defensively: a focus that is out of range for the
//! current data yields placeholders or no neighbour, never a panic.

use super::engine::{Direction, FocusCoordinate};
use crate::data::label::strip_parenthetical;
use crate::data::{CellStyle, CellValue, Column, Row, StyleResolver};

/// Content shown when the focus points outside the data.
pub const NO_DATA: &str = "No data";
/// Label shown when the row or column is unknown.
pub const UNKNOWN: &str = "Unknown";

/// Preview of a neighbouring cell.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacentCell {
    /// Neighbour's value.
    pub content: CellValue,
    /// Row identifier (vertical neighbours) or column label (horizontal ones).
    pub identifier: String,
}

/// Neighbour previews in the four directions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacentCells {
    /// Same column, previous row.
    pub up: Option<AdjacentCell>,
    /// Same row, next visible column.
    pub right: Option<AdjacentCell>,
    /// Same column, next row.
    pub down: Option<AdjacentCell>,
    /// Same row, previous visible column.
    pub left: Option<AdjacentCell>,
}

impl AdjacentCells {
    /// Neighbour in `direction`.
    pub fn get(&self, direction: Direction) -> Option<&AdjacentCell> {
        match direction {
            Direction::Up => self.up.as_ref(),
            Direction::Right => self.right.as_ref(),
            Direction::Down => self.down.as_ref(),
            Direction::Left => self.left.as_ref(),
        }
    }
}

/// The focused cell, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentCell {
    /// Cell value.
    pub content: CellValue,
    /// Column label.
    pub column: String,
    /// Row identifier.
    pub row: String,
    /// Focused row index.
    pub row_index: usize,
    /// Focused visible column index.
    pub col_index: usize,
    /// Key of the focused column; `None` for placeholders.
    pub column_key: Option<String>,
    /// Resolved cell style.
    pub style: CellStyle,
}

impl CurrentCell {
    fn placeholder(focus: FocusCoordinate) -> Self {
        Self {
            content: CellValue::from(NO_DATA),
            column: UNKNOWN.to_string(),
            row: UNKNOWN.to_string(),
            row_index: focus.row_index,
            col_index: focus.col_index,
            column_key: None,
            style: CellStyle::default(),
        }
    }

    /// Check if this is the out-of-range placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.column_key.is_none()
    }
}

/// Label for a row in previews: its identifier, else `Row N` (1-based).
pub fn row_label(identifiers: &[String], row_index: usize) -> String {
    identifiers
        .get(row_index)
        .map(|id| strip_parenthetical(id))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Row {}", row_index + 1))
}

/// Label for a column in previews: its label, else its key.
pub fn column_label(column: &Column) -> String {
    let label = strip_parenthetical(&column.label);
    if label.is_empty() {
        column.key.clone()
    } else {
        label.to_string()
    }
}

/// Resolve the neighbours of `focus`.
pub fn adjacent(
    focus: FocusCoordinate,
    rows: &[Row],
    visible_columns: &[Column],
    identifiers: &[String],
) -> AdjacentCells {
    let mut info = AdjacentCells::default();
    if visible_columns.is_empty() {
        return info;
    }

    let FocusCoordinate {
        row_index: r,
        col_index: c,
    } = focus;
    let current_column = visible_columns.get(c);
    let current_row = rows.get(r);

    let vertical = |row_index: usize| -> Option<AdjacentCell> {
        let row = rows.get(row_index)?;
        let column = current_column?;
        Some(AdjacentCell {
            content: row.value(&column.key).clone(),
            identifier: row_label(identifiers, row_index),
        })
    };

    let horizontal = |col_index: usize| -> Option<AdjacentCell> {
        let row = current_row?;
        let column = visible_columns.get(col_index)?;
        Some(AdjacentCell {
            content: row.value(&column.key).clone(),
            identifier: column_label(column),
        })
    };

    if r > 0 {
        info.up = vertical(r - 1);
    }
    info.down = r.checked_add(1).and_then(vertical);
    if c > 0 {
        info.left = horizontal(c - 1);
    }
    info.right = c.checked_add(1).and_then(horizontal);

    info
}

/// Resolve the focused cell, with placeholders when `focus` is out of range.
pub fn current_cell(
    focus: FocusCoordinate,
    rows: &[Row],
    visible_columns: &[Column],
    identifiers: &[String],
    styles: &dyn StyleResolver,
) -> CurrentCell {
    let (Some(row), Some(column)) = (rows.get(focus.row_index), visible_columns.get(focus.col_index))
    else {
        return CurrentCell::placeholder(focus);
    };

    let content = row.value(&column.key).clone();
    let style = styles.resolve(column, &content);
    let label = if column.label.is_empty() {
        column.key.clone()
    } else {
        column.label.clone()
    };

    CurrentCell {
        content,
        column: label,
        row: row_label(identifiers, focus.row_index),
        row_index: focus.row_index,
        col_index: focus.col_index,
        column_key: Some(column.key.clone()),
        style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::styling::{PlainResolver, ShadingResolver};
    use crate::focus_viewer::engine::{FocusEngine, TableExtent};
    use crate::focus_viewer::identifiers::derive_identifiers;
    use std::time::{Duration, Instant};

    fn table() -> (Vec<Row>, Vec<Column>) {
        let rows = vec![
            Row::new().with("name", "Eggs (large)").with("qty", 12.0).with("note", "fresh"),
            Row::new().with("name", "Milk").with("qty", 1.0),
            Row::new().with("name", "").with("qty", 3.0).with("note", "jam"),
        ];
        let columns = vec![
            Column::new("name"),
            Column::new("qty").with_label("Quantity (units)"),
            Column::new("note").with_label(""),
        ];
        (rows, columns)
    }

    #[test]
    fn corner_has_only_down_and_right() {
        let (rows, columns) = table();
        let ids = derive_identifiers(&rows, &columns, None);
        let adj = adjacent(FocusCoordinate::new(0, 0), &rows, &columns, &ids);
        assert!(adj.up.is_none());
        assert!(adj.left.is_none());
        assert_eq!(
            adj.down,
            Some(AdjacentCell {
                content: CellValue::from("Milk"),
                identifier: "Milk".into()
            })
        );
        assert_eq!(
            adj.right,
            Some(AdjacentCell {
                content: CellValue::Number(12.0),
                identifier: "Quantity".into()
            })
        );
    }

    #[test]
    fn labels_fall_back_to_row_number_and_key() {
        let (rows, columns) = table();
        let ids = derive_identifiers(&rows, &columns, None);
        let adj = adjacent(FocusCoordinate::new(1, 1), &rows, &columns, &ids);
        assert_eq!(adj.down.as_ref().map(|a| a.identifier.as_str()), Some("Row 3"));
        assert_eq!(adj.up.as_ref().map(|a| a.identifier.as_str()), Some("Eggs"));
        let right = adj.right.expect("note column");
        assert_eq!(right.identifier, "note");
        assert_eq!(right.content, CellValue::Null);
    }

    #[test]
    fn no_visible_columns_means_no_neighbours() {
        let (rows, _) = table();
        let adj = adjacent(FocusCoordinate::new(1, 0), &rows, &[], &[]);
        assert_eq!(adj, AdjacentCells::default());
    }

    #[test]
    fn out_of_range_focus_reads_as_placeholder() {
        let (rows, columns) = table();
        let cell = current_cell(FocusCoordinate::new(9, 0), &rows, &columns, &[], &PlainResolver);
        assert!(cell.is_placeholder());
        assert_eq!(cell.content, CellValue::from(NO_DATA));
        assert_eq!(cell.column, UNKNOWN);
        assert_eq!(cell.row, UNKNOWN);
        assert_eq!(cell.row_index, 9);

        let adj = adjacent(FocusCoordinate::new(9, 0), &rows, &columns, &[]);
        assert!(adj.down.is_none());
        assert!(adj.right.is_none());
    }

    #[test]
    fn empty_table_reads_as_placeholder() {
        let columns = vec![Column::new("a")];
        let cell = current_cell(FocusCoordinate::default(), &[], &columns, &[], &ShadingResolver);
        assert_eq!(cell.content, CellValue::from(NO_DATA));
        assert_eq!(cell.row, UNKNOWN);
    }

    #[test]
    fn current_cell_reports_labels() {
        let (rows, columns) = table();
        let ids = derive_identifiers(&rows, &columns, None);
        let cell = current_cell(FocusCoordinate::new(0, 1), &rows, &columns, &ids, &PlainResolver);
        assert_eq!(cell.content, CellValue::Number(12.0));
        assert_eq!(cell.column, "Quantity (units)");
        assert_eq!(cell.row, "Eggs");
        assert_eq!(cell.column_key.as_deref(), Some("qty"));
    }

    #[test]
    fn adjacent_content_matches_cell_after_move() {
        let (rows, columns) = table();
        let ids = derive_identifiers(&rows, &columns, None);
        let mut engine = FocusEngine::new(
            FocusCoordinate::default(),
            TableExtent::new(rows.len(), columns.len()),
            Duration::from_millis(300),
        );
        let now = Instant::now();

        for direction in [Direction::Right, Direction::Down, Direction::Right, Direction::Down, Direction::Left, Direction::Up] {
            let before = adjacent(engine.focus(), &rows, &columns, &ids);
            let expected = before.get(direction).cloned();
            let moved = engine.step(direction, now);
            assert_eq!(moved, expected.is_some());
            if let Some(expected) = expected {
                let cell = current_cell(engine.focus(), &rows, &columns, &ids, &PlainResolver);
                assert_eq!(cell.content, expected.content);
            }
        }
    }
}
