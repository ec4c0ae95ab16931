//! Full table view: the responsive table the focus viewer opens from.
//!
//! Holds the loaded dataset together with search, sort, column visibility
//! and the selection cursor. Rendering lives in [`ui`].

pub mod search;
pub mod sort;
pub mod tone;
pub mod ui;
pub mod visibility;
pub mod widths;

use crate::config::LayoutSettings;
use crate::data::{CellValue, Column, Dataset, Row};
use crate::focus_viewer::{navigable_columns, FocusCoordinate, FocusTable};
use search::SearchState;
use sort::SortState;
use visibility::VisibilityResolver;

/// Column picker opened with `v`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnPicker {
    /// Highlighted column (index into all columns).
    pub cursor: usize,
}

/// State for the full table view.
#[derive(Debug, Default)]
pub struct TableViewState {
    dataset: Dataset,
    /// Bumped whenever the column set or a visibility flag changes.
    revision: u64,
    /// Filtered and sorted row indices into the dataset.
    view: Vec<usize>,
    visibility: VisibilityResolver,
    viewport_width: u32,
    /// Search state.
    pub search: SearchState,
    /// Sort state.
    pub sort: SortState,
    /// Selected row (index into the filtered view).
    pub cursor_row: usize,
    /// Selected column (index into the visible columns).
    pub cursor_col: usize,
    /// First row drawn.
    pub scroll_row: usize,
    /// Open column picker, if any.
    pub picker: Option<ColumnPicker>,
}

impl TableViewState {
    /// Create a view over `dataset`.
    pub fn new(dataset: Dataset) -> Self {
        let mut state = Self::default();
        state.set_dataset(dataset);
        state
    }

    /// Replace the dataset, resetting search, sort and cursor.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        tracing::info!(
            "Table view showing '{}' ({} rows, {} columns)",
            dataset.title,
            dataset.row_count(),
            dataset.column_count()
        );
        self.dataset = dataset;
        self.revision += 1;
        self.search.clear();
        self.sort = SortState::default();
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.scroll_row = 0;
        self.picker = None;
        self.visibility.invalidate();
        self.rebuild_view();
    }

    /// Loaded dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Column-set revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Recompute the visible columns for `width`, if anything changed.
    pub fn refresh_layout(&mut self, width: u32, layout: &LayoutSettings) {
        self.viewport_width = width;
        let count = self
            .visibility
            .visible(&self.dataset.columns, self.revision, width, layout)
            .len();
        self.cursor_col = self.cursor_col.min(count.saturating_sub(1));
    }

    /// Indices of the visible columns (as of the last refresh).
    pub fn visible_indices(&self) -> &[usize] {
        self.visibility.cached()
    }

    /// Visible columns (as of the last refresh).
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.visible_indices()
            .iter()
            .filter_map(|&i| self.dataset.columns.get(i))
            .collect()
    }

    /// Number of rows passing the search.
    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    /// Rows in display order.
    pub fn view_rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.view.iter().filter_map(|&i| self.dataset.rows.get(i))
    }

    /// Row at `index` in display order.
    pub fn view_row(&self, index: usize) -> Option<&Row> {
        self.view.get(index).and_then(|&i| self.dataset.rows.get(i))
    }

    /// Re-run search and sort over the dataset.
    pub fn rebuild_view(&mut self) {
        let rows = &self.dataset.rows;
        let mut view: Vec<usize> = (0..rows.len())
            .filter(|&i| self.search.matches(&rows[i]))
            .collect();
        self.sort.apply(rows, &mut view);
        self.view = view;
        self.cursor_row = self.cursor_row.min(self.view.len().saturating_sub(1));
        self.scroll_row = self.scroll_row.min(self.cursor_row);
    }

    /// Selected column, if any.
    pub fn selected_column(&self) -> Option<&Column> {
        self.visible_indices()
            .get(self.cursor_col)
            .and_then(|&i| self.dataset.columns.get(i))
    }

    /// Value of the selected cell, if any.
    pub fn selected_value(&self) -> Option<&CellValue> {
        let column = self.selected_column()?;
        Some(self.view_row(self.cursor_row)?.value(&column.key))
    }

    /// Move the cursor by a row and column delta, clamped to the view.
    pub fn move_cursor(&mut self, rows: isize, cols: isize) {
        let max_row = self.view.len().saturating_sub(1);
        let max_col = self.visible_indices().len().saturating_sub(1);
        self.cursor_row = self.cursor_row.saturating_add_signed(rows).min(max_row);
        self.cursor_col = self.cursor_col.saturating_add_signed(cols).min(max_col);
    }

    /// Jump to the first row.
    pub fn cursor_home(&mut self) {
        self.cursor_row = 0;
    }

    /// Jump to the last row.
    pub fn cursor_end(&mut self) {
        self.cursor_row = self.view.len().saturating_sub(1);
    }

    /// Keep the cursor inside a window of `height` rows.
    pub fn scroll_to_cursor(&mut self, height: usize) {
        let height = height.max(1);
        if self.cursor_row < self.scroll_row {
            self.scroll_row = self.cursor_row;
        } else if self.cursor_row >= self.scroll_row + height {
            self.scroll_row = self.cursor_row + 1 - height;
        }
    }

    /// Sort on the selected column (again to flip the direction).
    pub fn sort_selected(&mut self) {
        let Some(key) = self.selected_column().map(|c| c.key.clone()) else {
            return;
        };
        self.sort.toggle(&key);
        tracing::debug!("Sorting on '{}' {:?}", key, self.sort.direction);
        self.rebuild_view();
    }

    /// Apply the search buffer as the active query.
    pub fn submit_search(&mut self) {
        self.search.submit();
        tracing::debug!("Search query '{}'", self.search.query());
        self.cursor_row = 0;
        self.scroll_row = 0;
        self.rebuild_view();
    }

    /// Flip the explicit visibility of column `index` (into all columns).
    pub fn toggle_column(&mut self, index: usize, layout: &LayoutSettings) {
        let shown = self.visible_indices().contains(&index);
        let Some(column) = self.dataset.columns.get_mut(index) else {
            return;
        };
        column.visible = Some(!shown);
        tracing::debug!("Column '{}' visible: {}", column.key, !shown);
        self.revision += 1;
        self.refresh_layout(self.viewport_width, layout);
    }

    /// Open the column picker.
    pub fn open_picker(&mut self) {
        if !self.dataset.columns.is_empty() {
            self.picker = Some(ColumnPicker::default());
        }
    }

    /// Move the picker cursor.
    pub fn move_picker(&mut self, delta: isize) {
        let max = self.dataset.columns.len().saturating_sub(1);
        if let Some(ref mut picker) = self.picker {
            picker.cursor = picker.cursor.saturating_add_signed(delta).min(max);
        }
    }

    /// Toggle the column under the picker cursor.
    pub fn toggle_picked(&mut self, layout: &LayoutSettings) {
        if let Some(picker) = self.picker {
            self.toggle_column(picker.cursor, layout);
        }
    }

    /// Close the column picker.
    pub fn close_picker(&mut self) {
        self.picker = None;
    }

    /// Table handed to the focus viewer: rows as currently filtered and
    /// sorted, columns with their flags.
    pub fn focus_table(&self) -> FocusTable {
        FocusTable {
            title: self.dataset.title.clone(),
            rows: self.view_rows().cloned().collect(),
            columns: self.dataset.columns.clone(),
        }
    }

    /// Focus coordinate matching the selected cell.
    ///
    /// The focus viewer navigates every column that is not explicitly
    /// hidden, so the column index is translated by key.
    pub fn focus_for_selection(&self) -> FocusCoordinate {
        let col_index = self
            .selected_column()
            .and_then(|selected| {
                navigable_columns(&self.dataset.columns)
                    .iter()
                    .position(|c| c.key == selected.key)
            })
            .unwrap_or(0);
        FocusCoordinate::new(self.cursor_row, col_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let keys = ["name", "qty", "aisle", "note", "price"]
            .iter()
            .map(|k| k.to_string())
            .collect();
        let rows = vec![
            Row::new().with("name", "Milk").with("qty", 1.0).with("aisle", "B"),
            Row::new().with("name", "Eggs").with("qty", 12.0).with("aisle", "A"),
            Row::new().with("name", "Jam").with("qty", 3.0).with("aisle", "C"),
        ];
        Dataset::new("Groceries", keys, rows)
    }

    #[test]
    fn narrow_viewport_shows_leading_columns() {
        let layout = LayoutSettings::default();
        let mut view = TableViewState::new(dataset());
        view.refresh_layout(500, &layout);
        assert_eq!(view.visible_indices(), &[0, 1]);
        view.refresh_layout(1600, &layout);
        assert_eq!(view.visible_indices().len(), 5);
    }

    #[test]
    fn search_and_sort_shape_the_view() {
        let layout = LayoutSettings::default();
        let mut view = TableViewState::new(dataset());
        view.refresh_layout(1600, &layout);

        view.cursor_col = 1;
        view.sort_selected();
        let names: Vec<String> = view.view_rows().map(|r| r.value("name").to_string()).collect();
        assert_eq!(names, ["Milk", "Jam", "Eggs"]);

        view.search.start();
        view.search.input('m');
        view.submit_search();
        assert_eq!(view.view_len(), 2);
    }

    #[test]
    fn toggling_a_column_bumps_revision() {
        let layout = LayoutSettings::default();
        let mut view = TableViewState::new(dataset());
        view.refresh_layout(500, &layout);
        let before = view.revision();

        view.toggle_column(0, &layout);
        assert_eq!(view.revision(), before + 1);
        assert_eq!(view.visible_indices(), &[1]);

        view.toggle_column(3, &layout);
        assert_eq!(view.visible_indices(), &[1, 3]);
    }

    #[test]
    fn focus_starts_at_selected_cell() {
        let layout = LayoutSettings::default();
        let mut view = TableViewState::new(dataset());
        view.refresh_layout(1600, &layout);
        view.toggle_column(0, &layout);
        view.refresh_layout(1600, &layout);

        // Visible: qty, aisle, note, price. Select aisle on row 2.
        view.move_cursor(2, 1);
        assert_eq!(view.selected_column().map(|c| c.key.as_str()), Some("aisle"));
        assert_eq!(view.focus_for_selection(), FocusCoordinate::new(2, 1));

        let table = view.focus_table();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.columns.len(), 5);
    }

    #[test]
    fn cursor_stays_in_range() {
        let layout = LayoutSettings::default();
        let mut view = TableViewState::new(dataset());
        view.refresh_layout(500, &layout);
        view.move_cursor(10, 10);
        assert_eq!((view.cursor_row, view.cursor_col), (2, 1));
        view.move_cursor(-10, -10);
        assert_eq!((view.cursor_row, view.cursor_col), (0, 0));

        view.cursor_end();
        view.scroll_to_cursor(2);
        assert_eq!(view.scroll_row, 1);
    }
}
