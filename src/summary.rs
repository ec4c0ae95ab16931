//! Plain-text table report for `--summary`.

use crate::config::Settings;
use crate::data::Dataset;
use crate::focus_viewer::identifiers::derive_identifiers;
use crate::focus_viewer::navigable_columns;
use crate::table_view::visibility;

/// How many row identifiers the report lists.
const IDENTIFIER_PREVIEW: usize = 5;

/// Render a short report of `dataset` as laid out at `width` pixels.
pub fn summarize(dataset: &Dataset, settings: &Settings, width: u32) -> String {
    let mut out = String::new();
    let visible: Vec<&str> = visibility::resolve(&dataset.columns, width, &settings.layout)
        .into_iter()
        .filter_map(|i| dataset.columns.get(i))
        .map(|c| c.label.as_str())
        .collect();
    let navigable = navigable_columns(&dataset.columns);
    let identifiers = derive_identifiers(&dataset.rows, &navigable, settings.preferred_key.as_deref());

    out.push_str(&format!("Title: {}\n", dataset.title));
    out.push_str(&format!("Rows: {}\n", dataset.row_count()));
    out.push_str(&format!("Columns: {}\n", dataset.column_count()));
    out.push_str(&format!(
        "Visible at {}px: {} ({})\n",
        width,
        visible.len(),
        visible.join(", ")
    ));
    out.push_str(&format!("Focus columns: {}\n", navigable.len()));

    let preview: Vec<&str> = identifiers
        .iter()
        .take(IDENTIFIER_PREVIEW)
        .map(String::as_str)
        .collect();
    out.push_str(&format!("Identifiers: {}\n", preview.join(", ")));
    out
}
