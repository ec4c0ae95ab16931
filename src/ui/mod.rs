//! User interface rendering.

pub mod formatters;
pub mod keymap_bar;
pub mod status_bar;
mod theme;

use crate::app::App;
use crate::file_browser::ui::draw_file_browser;
use crate::focus_viewer::ui::draw_focus_viewer;
use crate::table_view::ui::{body_height, draw_table_view};
use keymap_bar::{draw_keymap, KeymapContext};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use status_bar::draw_status;

pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);

    // Content, status bar, key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    let context = if app.file_browser_mode {
        draw_file_browser(f, &mut app.file_browser, chunks[0], &colors);
        KeymapContext::Browser
    } else if app.has_table() {
        app.table.scroll_to_cursor(body_height(chunks[0].height));
        draw_table_view(f, chunks[0], &app.table, &colors);
        if app.table.search.is_active() {
            KeymapContext::Search
        } else if app.table.picker.is_some() {
            KeymapContext::Picker
        } else {
            KeymapContext::Table
        }
    } else {
        draw_welcome(f, chunks[0], app.error_message.as_deref(), &colors);
        KeymapContext::Browser
    };

    draw_status(f, chunks[1], &app.status, app.error_message.as_deref(), &colors);
    draw_keymap(f, chunks[2], context, &colors);

    // The focus viewer takes over the whole frame.
    draw_focus_viewer(f, &app.focus, &colors);
}

fn draw_welcome(f: &mut Frame<'_>, area: Rect, error: Option<&str>, colors: &ThemeColors) {
    let text = error.unwrap_or("No table loaded. Press o to browse for a .json file.");
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(colors.fg1))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" tabfocus ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.bg2))
                .style(Style::default().bg(colors.bg0)),
        );
    f.render_widget(paragraph, area);
}

/// A rectangle of `percent_x` by `percent_y` centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
