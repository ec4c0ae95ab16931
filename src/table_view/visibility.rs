//! Responsive column visibility.
//!
//! A column explicitly marked hidden is never shown and one explicitly marked
//! visible always is. Every other column is shown when its position is below
//! the breakpoint count for the current viewport width.

use crate::config::{Breakpoint, LayoutSettings};
use crate::data::Column;

/// Number of columns the layout allows at `width` pixels.
///
/// `max(1, min(breakpoint_max, floor(width / min_column_width), total))`,
/// or 0 when there are no columns. A width that fits no column still
/// shows one.
pub fn shown_count(total: usize, width: u32, layout: &LayoutSettings) -> usize {
    if total == 0 {
        return 0;
    }

    let breakpoint_max = active_breakpoint(&layout.breakpoints, width)
        .map(|bp| bp.max_columns)
        .unwrap_or(total);
    let max_fit = (width / layout.min_column_width.max(1)) as usize;
    if max_fit == 0 {
        return 1;
    }

    breakpoint_max.min(max_fit).min(total).max(1)
}

fn active_breakpoint(breakpoints: &[Breakpoint], width: u32) -> Option<&Breakpoint> {
    breakpoints
        .iter()
        .filter(|bp| width <= bp.width)
        .min_by_key(|bp| bp.width)
}

/// Indices of the visible columns, in order.
pub fn resolve(columns: &[Column], width: u32, layout: &LayoutSettings) -> Vec<usize> {
    let count = shown_count(columns.len(), width, layout);
    columns
        .iter()
        .enumerate()
        .filter(|(index, column)| match column.visible {
            Some(visible) => visible,
            None => *index < count,
        })
        .map(|(index, _)| index)
        .collect()
}

/// Memoised [`resolve`].
///
/// The result is recomputed only when the column-set revision or the width
/// changes.
#[derive(Debug, Clone, Default)]
pub struct VisibilityResolver {
    key: Option<(u64, u32)>,
    visible: Vec<usize>,
    recomputes: usize,
}

impl VisibilityResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible column indices for `columns` at `revision` and `width`.
    pub fn visible(
        &mut self,
        columns: &[Column],
        revision: u64,
        width: u32,
        layout: &LayoutSettings,
    ) -> &[usize] {
        if self.key != Some((revision, width)) {
            self.visible = resolve(columns, width, layout);
            self.key = Some((revision, width));
            self.recomputes += 1;
            tracing::debug!(
                "Visible columns at width {}: {} of {}",
                width,
                self.visible.len(),
                columns.len()
            );
        }
        &self.visible
    }

    /// Cached result of the last computation.
    pub fn cached(&self) -> &[usize] {
        &self.visible
    }

    /// How many times the visible set was computed.
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }

    /// Force the next call to recompute.
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
