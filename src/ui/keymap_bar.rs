//! Keymap help bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Which screen the keymap describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapContext {
    /// File browser.
    Browser,
    /// Search prompt.
    Search,
    /// Column picker.
    Picker,
    /// Table view.
    Table,
}

/// Help text for a context.
pub fn keymap_text(context: KeymapContext) -> &'static str {
    match context {
        KeymapContext::Browser => "jk/↑↓:nav | Enter/l:open | h:parent | .:hidden | q:quit",
        KeymapContext::Search => "Enter:apply | Esc:cancel | Type to search",
        KeymapContext::Picker => "jk/↑↓:nav | Space:toggle | Esc/v:close",
        KeymapContext::Table => {
            "q:quit | hjkl:move | Enter:focus cell | m:focus | /:search | s:sort | v:columns | y:copy | o:open | T:theme"
        },
    }
}

/// Draw the keymap help bar.
pub fn draw_keymap(f: &mut Frame<'_>, area: Rect, context: KeymapContext, colors: &ThemeColors) {
    let paragraph =
        Paragraph::new(keymap_text(context)).style(Style::default().fg(colors.fg1).bg(colors.bg0));
    f.render_widget(paragraph, area);
}
