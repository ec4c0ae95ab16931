//! Focus viewer - pure rendering layer.

use super::adjacent::{AdjacentCell, CurrentCell};
use super::engine::Direction;
use super::{FocusSession, FocusViewerState};
use crate::data::label::strip_markdown_links;
use crate::data::CellStyle;
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::str::FromStr;

/// Screen regions of the focus viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusLayout {
    /// Title and position readout.
    pub header: Rect,
    /// Focused column label.
    pub column: Rect,
    /// Preview of the row above.
    pub up: Rect,
    /// Preview of the previous column.
    pub left: Rect,
    /// The focused cell.
    pub cell: Rect,
    /// Preview of the next column.
    pub right: Rect,
    /// Preview of the row below.
    pub down: Rect,
    /// Key help.
    pub footer: Rect,
}

impl FocusLayout {
    /// Split `area` into viewer regions.
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(1), // Column label
                Constraint::Length(4), // Up
                Constraint::Min(5),    // Left | cell | right
                Constraint::Length(4), // Down
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let middle = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(50),
                Constraint::Percentage(25),
            ])
            .split(rows[3]);

        Self {
            header: rows[0],
            column: rows[1],
            up: rows[2],
            left: middle[0],
            cell: middle[1],
            right: middle[2],
            down: rows[4],
            footer: rows[5],
        }
    }

    /// Region of the preview in `direction`.
    pub fn preview(&self, direction: Direction) -> Rect {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// Draw the focus viewer over the whole frame.
pub fn draw_focus_viewer(f: &mut Frame<'_>, state: &FocusViewerState, colors: &ThemeColors) {
    if !state.visible {
        return;
    }
    let Some(session) = state.session() else {
        return;
    };

    let area = f.area();
    f.render_widget(Clear, area);
    f.render_widget(Block::default().style(Style::default().bg(colors.bg0)), area);

    let layout = FocusLayout::new(area);
    draw_header(f, layout.header, session, colors);
    draw_footer(f, layout.footer, colors);

    if !session.has_data() {
        let body = Rect {
            y: layout.column.y,
            height: layout.footer.y.saturating_sub(layout.column.y),
            ..area
        };
        draw_empty(f, body, colors);
        return;
    }

    let cell = session.current_cell();
    let adjacent = session.adjacent();

    draw_column_label(f, layout.column, &cell, colors);
    for direction in Direction::ALL {
        draw_preview(f, layout.preview(direction), direction, adjacent.get(direction), colors);
    }
    draw_cell(f, layout.cell, &cell, session.engine().animation_direction(), colors);
}

fn draw_header(f: &mut Frame<'_>, area: Rect, session: &FocusSession, colors: &ThemeColors) {
    let line = Line::from(vec![
        Span::styled(
            session.title().to_string(),
            Style::default()
                .fg(colors.yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(session.position_label(), Style::default().fg(colors.gray)),
    ]);

    let paragraph = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(colors.bg2)),
    );
    f.render_widget(paragraph, area);
}

fn draw_column_label(f: &mut Frame<'_>, area: Rect, cell: &CurrentCell, colors: &ThemeColors) {
    let paragraph = Paragraph::new(cell.column.as_str())
        .style(Style::default().fg(colors.green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn draw_preview(
    f: &mut Frame<'_>,
    area: Rect,
    direction: Direction,
    neighbour: Option<&AdjacentCell>,
    colors: &ThemeColors,
) {
    let Some(neighbour) = neighbour else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.bg1));
        f.render_widget(block, area);
        return;
    };

    let title = format!(" {} {} ", direction.arrow(), neighbour.identifier);
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(colors.aqua))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.bg2));

    let paragraph = Paragraph::new(display_text(&neighbour.content.to_string()))
        .style(Style::default().fg(colors.fg1))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

fn draw_cell(
    f: &mut Frame<'_>,
    area: Rect,
    cell: &CurrentCell,
    animation: Option<Direction>,
    colors: &ThemeColors,
) {
    // Border lights up while the last move's animation tag is set.
    let (border, title) = match animation {
        Some(direction) => (colors.yellow, format!(" {} {} ", direction.arrow(), cell.row)),
        None => (colors.bg2, format!(" {} ", cell.row)),
    };

    let base = Style::default().fg(colors.fg0).bg(colors.bg1);
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(colors.orange).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(colors.bg1));

    let text = display_text(&cell.content.to_string());
    let paragraph = Paragraph::new(text)
        .style(apply_cell_style(base, &cell.style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

fn draw_empty(f: &mut Frame<'_>, area: Rect, colors: &ThemeColors) {
    let paragraph = Paragraph::new("No data to display")
        .style(Style::default().fg(colors.gray))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn draw_footer(f: &mut Frame<'_>, area: Rect, colors: &ThemeColors) {
    let paragraph = Paragraph::new("←↑↓→/hjkl: Move | Drag: Swipe | Click: Jump | y: Copy | Esc/q: Close")
        .style(Style::default().fg(colors.green))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn display_text(raw: &str) -> String {
    let text = strip_markdown_links(raw);
    if text.is_empty() {
        "(empty)".to_string()
    } else {
        text
    }
}

/// Overlay a resolved cell style on `base`.
///
/// Colors that ratatui cannot parse are ignored.
pub fn apply_cell_style(base: Style, style: &CellStyle) -> Style {
    let mut result = base;
    if let Some(fg) = style.color.as_deref().and_then(|c| Color::from_str(c).ok()) {
        result = result.fg(fg);
    }
    if let Some(bg) = style
        .background_color
        .as_deref()
        .and_then(|c| Color::from_str(c).ok())
    {
        result = result.bg(bg);
    }
    if style.is_bold() {
        result = result.add_modifier(Modifier::BOLD);
    }
    if style.is_italic() {
        result = result.add_modifier(Modifier::ITALIC);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previews_do_not_overlap() {
        let layout = FocusLayout::new(Rect::new(0, 0, 80, 40));
        for a in Direction::ALL {
            for b in Direction::ALL {
                if a != b {
                    assert!(!layout.preview(a).intersects(layout.preview(b)), "{:?} {:?}", a, b);
                }
            }
            assert!(!layout.preview(a).intersects(layout.cell));
        }
    }

    #[test]
    fn cell_style_maps_to_terminal_style() {
        let style = CellStyle {
            color: Some("#ff0000".into()),
            background_color: Some("not-a-color".into()),
            font_weight: Some("bold".into()),
            font_style: None,
        };
        let result = apply_cell_style(Style::default(), &style);
        assert_eq!(result.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(result.bg, None);
        assert!(result.add_modifier.contains(Modifier::BOLD));
    }
}
