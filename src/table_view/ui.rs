//! Table view - pure rendering layer.

use super::tone::{cell_tone, CellTone};
use super::widths::column_widths;
use super::TableViewState;
use crate::data::label::strip_markdown_links;
use crate::data::styling::{ShadingResolver, StyleResolver};
use crate::focus_viewer::ui::apply_cell_style;
use crate::ui::formatters::{format_number, truncate_text};
use crate::ui::{centered_rect, ThemeColors};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Table,
    },
    Frame,
};

/// Rows taken by the title, search line, table border and header.
const CHROME_ROWS: u16 = 5;

/// Number of data rows that fit in a table area of `height` rows.
pub fn body_height(height: u16) -> usize {
    height.saturating_sub(CHROME_ROWS).max(1) as usize
}

/// Draw the table view into `area`.
pub fn draw_table_view(f: &mut Frame<'_>, area: Rect, state: &TableViewState, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Search
            Constraint::Min(3),    // Table
        ])
        .split(area);

    draw_title(f, chunks[0], state, colors);
    draw_search(f, chunks[1], state, colors);

    if state.visible_indices().is_empty() {
        let message = if state.dataset().columns.is_empty() {
            "No data to display"
        } else {
            "All columns hidden (v: choose columns)"
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(colors.gray))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.bg2)),
            );
        f.render_widget(paragraph, chunks[2]);
    } else {
        draw_table(f, chunks[2], state, colors);
    }

    if state.picker.is_some() {
        draw_column_picker(f, area, state, colors);
    }
}

fn draw_title(f: &mut Frame<'_>, area: Rect, state: &TableViewState, colors: &ThemeColors) {
    let dataset = state.dataset();
    let line = Line::from(vec![
        Span::styled(
            dataset.title.clone(),
            Style::default()
                .fg(colors.yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {} of {} rows, {} of {} columns",
                format_number(state.view_len()),
                format_number(dataset.row_count()),
                state.visible_indices().len(),
                dataset.column_count()
            ),
            Style::default().fg(colors.gray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_search(f: &mut Frame<'_>, area: Rect, state: &TableViewState, colors: &ThemeColors) {
    let line = if state.search.is_active() {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(colors.aqua)),
            Span::styled(
                format!("{}_", state.search.buffer()),
                Style::default().fg(colors.fg0),
            ),
        ])
    } else if !state.search.query().is_empty() {
        Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(colors.aqua)),
            Span::styled(state.search.query().to_string(), Style::default().fg(colors.fg0)),
        ])
    } else {
        Line::from(Span::styled("/ to search", Style::default().fg(colors.gray)))
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_table(f: &mut Frame<'_>, area: Rect, state: &TableViewState, colors: &ThemeColors) {
    let dataset = state.dataset();
    let columns = state.visible_columns();
    let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
    let percents = column_widths(&dataset.rows, &keys);

    let inner_width = area.width.saturating_sub(2);
    let col_widths: Vec<u16> = percents
        .iter()
        .map(|p| (u32::from(inner_width) * u32::from(*p) / 100).max(4) as u16)
        .collect();

    let header_cells: Vec<Cell> = columns
        .iter()
        .zip(&col_widths)
        .map(|(column, width)| {
            let mut label = column.label.clone();
            if state.sort.key.as_deref() == Some(column.key.as_str()) {
                label = format!("{} {}", label, state.sort.direction.arrow());
            }
            let base = Style::default()
                .fg(colors.green)
                .add_modifier(Modifier::BOLD);
            let style = match column.shading {
                Some(ref shading) => apply_cell_style(base, &shading.header_style),
                None => base,
            };
            Cell::from(truncate_text(&label, *width as usize)).style(style)
        })
        .collect();

    let height = body_height(area.height + 2);
    let start = state.scroll_row;
    let end = (start + height).min(state.view_len());

    let rows: Vec<Row> = (start..end)
        .filter_map(|index| state.view_row(index).map(|row| (index, row)))
        .map(|(index, row)| {
            let cells: Vec<Cell> = columns
                .iter()
                .zip(&col_widths)
                .enumerate()
                .map(|(col, (column, width))| {
                    let value = row.value(&column.key);
                    let text = strip_markdown_links(&value.to_string());
                    let base = match cell_tone(&text) {
                        CellTone::Positive => Style::default().fg(colors.green),
                        CellTone::Negative => Style::default().fg(colors.red),
                        CellTone::Neutral => Style::default().fg(colors.fg0),
                    };
                    let mut style = apply_cell_style(base, &ShadingResolver.resolve(column, value));
                    if index == state.cursor_row && col == state.cursor_col {
                        style = Style::default()
                            .fg(colors.bg0)
                            .bg(colors.yellow)
                            .add_modifier(Modifier::BOLD);
                    } else if index == state.cursor_row {
                        style = style.bg(colors.bg1);
                    }
                    Cell::from(truncate_text(&text, *width as usize)).style(style)
                })
                .collect();
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = col_widths.iter().map(|w| Constraint::Length(*w)).collect();
    let table = Table::new(rows, widths)
        .header(Row::new(header_cells))
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.bg2)),
        )
        .style(Style::default().fg(colors.fg0).bg(colors.bg0));
    f.render_widget(table, area);

    if state.view_len() > height {
        let mut scrollbar_state =
            ScrollbarState::new(state.view_len().saturating_sub(height)).position(start);
        f.render_stateful_widget(
            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("^"))
                .end_symbol(Some("v")),
            area,
            &mut scrollbar_state,
        );
    }
}

fn draw_column_picker(f: &mut Frame<'_>, area: Rect, state: &TableViewState, colors: &ThemeColors) {
    let Some(picker) = state.picker else {
        return;
    };
    let popup = centered_rect(50, 70, area);
    f.render_widget(Clear, popup);

    let visible = state.visible_indices();
    let items: Vec<ListItem> = state
        .dataset()
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let mark = if visible.contains(&i) { "[x]" } else { "[ ]" };
            let style = if i == picker.cursor {
                Style::default().fg(colors.bg0).bg(colors.yellow)
            } else {
                Style::default().fg(colors.fg0)
            };
            ListItem::new(format!("{} {}", mark, column.label)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Columns (Space: toggle, Esc: close) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.bg2))
            .style(Style::default().bg(colors.bg0)),
    );
    f.render_widget(list, popup);
}
