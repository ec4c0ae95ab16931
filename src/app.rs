//! Application state and logic.

use std::path::PathBuf;
use std::time::Instant;

use crate::clipboard::copy_to_clipboard;
use crate::config::Settings;
use crate::data::DataReader;
use crate::file_browser::FileBrowserState;
use crate::focus_viewer::{
    CloseReason, Dispatch, FocusCoordinate, FocusViewerState, UserAgentProbe, ViewportProbe,
};
use crate::table_view::TableViewState;

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Gruvbox dark theme.
    #[default]
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }

    /// Parse a config name such as `gruvbox-dark`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "gruvbox-dark" | "dark" => Some(Theme::GruvboxDark),
            "gruvbox-light" | "light" => Some(Theme::GruvboxLight),
            _ => None,
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Current file path.
    pub file_path: Option<PathBuf>,
    /// Resolved settings.
    pub settings: Settings,
    /// Full table view.
    pub table: TableViewState,
    /// Focus viewer.
    pub focus: FocusViewerState,
    /// File browser state.
    pub file_browser: FileBrowserState,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Error message.
    pub error_message: Option<String>,
    /// File browser mode.
    pub file_browser_mode: bool,
    /// Terminal size in cells (columns, rows).
    pub terminal_size: (u16, u16),
}

impl App {
    /// Create a new application instance.
    pub fn new(file_path: Option<PathBuf>, settings: Settings) -> Self {
        let mut app = Self {
            file_path: file_path.clone(),
            theme: settings.theme,
            settings,
            table: TableViewState::default(),
            focus: FocusViewerState::new(),
            file_browser: FileBrowserState::new(),
            status: "Ready".to_string(),
            error_message: None,
            file_browser_mode: false,
            terminal_size: (80, 24),
        };

        match file_path {
            Some(path) if path.is_dir() => {
                app.file_browser.current_dir = path;
                app.file_browser.load_directory();
                app.file_browser_mode = true;
            },
            Some(path) if path.is_file() => {
                app.load_file(path);
            },
            None => {
                app.file_browser.load_directory();
                app.file_browser_mode = true;
            },
            _ => {
                app.error_message = Some("Invalid path provided".to_string());
            },
        }

        app
    }

    /// Load a table file.
    pub fn load_file(&mut self, path: PathBuf) {
        let canonical_path = match std::fs::canonicalize(&path) {
            Ok(p) => p,
            Err(e) => {
                self.error_message = Some(format!("Failed to resolve path: {}", e));
                self.status = "Error resolving file path".to_string();
                return;
            },
        };

        match DataReader::read_file(&canonical_path) {
            Ok(dataset) => {
                self.focus.close();
                self.table.set_dataset(dataset);
                self.refresh_layout();
                self.status = format!(
                    "{} loaded",
                    canonical_path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "file".to_string())
                );
                self.error_message = None;
                if let Some(parent) = canonical_path.parent() {
                    self.file_browser.current_dir = parent.to_path_buf();
                }
                self.file_path = Some(canonical_path);
            },
            Err(e) => {
                self.error_message = Some(format!("Error loading file: {}", e));
                self.status = "Error loading file".to_string();
                tracing::error!("Error loading file: {}", e);
            },
        }
    }

    /// Check whether a table is loaded.
    pub fn has_table(&self) -> bool {
        self.file_path.is_some() && self.error_message.is_none()
    }

    /// Terminal size in viewport pixels.
    pub fn viewport_px(&self) -> (u32, u32) {
        let (cols, rows) = self.terminal_size;
        self.settings.layout.viewport_px(cols, rows)
    }

    /// Recompute the table layout for the current viewport.
    pub fn refresh_layout(&mut self) {
        let (width, _) = self.viewport_px();
        self.table.refresh_layout(width, &self.settings.layout);
    }

    /// Terminal resized.
    pub fn resize(&mut self, cols: u16, rows: u16, now: Instant) {
        self.terminal_size = (cols, rows);
        self.refresh_layout();
        let (width, height) = self.viewport_px();
        let result = self.focus.handle_resize(width, height, now);
        self.on_focus_dispatch(result);
    }

    /// Device probe for the current settings.
    pub fn probe(&self) -> Box<dyn ViewportProbe> {
        Box::new(UserAgentProbe::new(
            self.settings.viewer.user_agent.clone(),
            self.settings.viewer.compact_max_width,
        ))
    }

    /// Open the focus viewer at `initial`.
    pub fn open_focus(&mut self, initial: FocusCoordinate) {
        if self.table.view_len() == 0 {
            self.status = "No rows to focus".to_string();
            return;
        }
        let table = self.table.focus_table();
        let result = self.focus.open(
            table,
            initial,
            &self.settings,
            self.probe(),
            self.viewport_px(),
        );
        if result == Dispatch::Ignored {
            self.status = "Focus view: arrows/hjkl or drag to move, Esc to close".to_string();
        }
        self.on_focus_dispatch(result);
    }

    /// Open the focus viewer at the selected table cell.
    pub fn open_focus_at_selection(&mut self) {
        let initial = self.table.focus_for_selection();
        self.open_focus(initial);
    }

    /// Open the focus viewer at the first cell.
    pub fn open_focus_at_origin(&mut self) {
        self.open_focus(FocusCoordinate::default());
    }

    /// React to what the focus viewer did.
    pub fn on_focus_dispatch(&mut self, result: Dispatch) {
        match result {
            Dispatch::Close(CloseReason::User) => {
                self.status = "Focus view closed".to_string();
            },
            Dispatch::Close(CloseReason::Landscape) => {
                self.status = "Focus view closed: handheld in landscape".to_string();
            },
            Dispatch::Moved(_) | Dispatch::Ignored => {},
        }
    }

    /// Fire deferred work that is due.
    pub fn tick(&mut self, now: Instant) {
        let result = self.focus.tick(now);
        self.on_focus_dispatch(result);
    }

    /// Copy the focused cell (focus view) or the selected cell (table view).
    pub fn copy_cell(&mut self) {
        let text = if self.focus.visible {
            self.focus
                .current_cell()
                .filter(|cell| !cell.is_placeholder())
                .map(|cell| cell.content.to_string())
        } else {
            self.table.selected_value().map(|value| value.to_string())
        };

        let Some(text) = text else {
            self.status = "No cell selected".to_string();
            return;
        };

        match copy_to_clipboard(&text) {
            Ok(()) => self.status = "Cell copied!".to_string(),
            Err(e) => self.status = format!("Copy failed: {}", e),
        }
    }

    /// Sort on the selected column.
    pub fn sort_selected(&mut self) {
        self.table.sort_selected();
        if let Some(ref key) = self.table.sort.key {
            self.status = format!("Sorted by {} {}", key, self.table.sort.direction.arrow());
        }
    }

    /// Toggle the column under the picker cursor.
    pub fn toggle_picked_column(&mut self) {
        self.table.toggle_picked(&self.settings.layout);
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Toggle show hidden files.
    pub fn toggle_hidden(&mut self) {
        self.file_browser.toggle_hidden();
        self.status = format!(
            "Show hidden: {}",
            if self.file_browser.show_hidden {
                "ON"
            } else {
                "OFF"
            }
        );
    }

    /// Open the selected entry in the file browser.
    pub fn browser_select(&mut self) {
        if let Some(path) = self.file_browser.select_current() {
            self.file_browser_mode = false;
            self.load_file(path);

            if self.error_message.is_some() {
                self.file_browser_mode = true;
                self.status =
                    "Error loading file (press q to quit, navigate to try another)".to_string();
            }
        }
    }

    /// Navigate to parent directory in file browser.
    pub fn browser_parent(&mut self) {
        self.file_browser.go_to_parent();
        self.status = format!("Browsing: {}", self.file_browser.current_dir.display());
    }

    /// Open the file browser next to the current file.
    pub fn open_file_browser_at_current(&mut self) {
        let start_dir = self
            .file_path
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        self.focus.close();
        self.file_browser.current_dir = start_dir;
        self.file_browser.load_directory();
        self.file_browser_mode = true;
        self.status = format!("File browser: {}", self.file_browser.current_dir.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_table(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("menu.json");
        fs::write(
            &path,
            r#"[{"name":"Eggs","qty":12,"note":"fresh"},{"name":"Milk","qty":1,"note":null}]"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn theme_names_parse() {
        assert_eq!(Theme::from_name("gruvbox-dark"), Some(Theme::GruvboxDark));
        assert_eq!(Theme::from_name(" Gruvbox-Light "), Some(Theme::GruvboxLight));
        assert_eq!(Theme::from_name("solarized"), None);
        assert_eq!(Theme::default().next(), Theme::GruvboxLight);
    }

    #[test]
    fn loading_a_file_fills_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(Some(write_table(dir.path())), Settings::default());
        assert!(app.has_table());
        assert!(!app.file_browser_mode);
        assert_eq!(app.table.dataset().row_count(), 2);
        // 80 cells = 640 px: breakpoint allows 3 columns, fit allows 5.
        assert_eq!(app.table.visible_indices(), &[0, 1, 2]);
    }

    #[test]
    fn directory_opens_browser() {
        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path());
        let app = App::new(Some(dir.path().to_path_buf()), Settings::default());
        assert!(app.file_browser_mode);
        assert!(app.file_browser.entries.iter().any(|e| e.is_table));
    }

    #[test]
    fn focus_opens_at_selection_and_closes_on_landscape_phone() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.viewer.user_agent = Some("Mozilla/5.0 (Linux; Android 14)".into());
        let mut app = App::new(Some(write_table(dir.path())), settings);

        // Portrait: 50x60 cells = 400x960 px.
        app.resize(50, 60, Instant::now());
        app.table.move_cursor(1, 1);
        app.open_focus_at_selection();
        assert!(app.focus.visible);
        assert_eq!(app.focus.focus(), Some(FocusCoordinate::new(1, 1)));

        // Landscape: 100x30 cells = 800x480 px, narrower than 1024.
        app.resize(100, 30, Instant::now());
        assert!(!app.focus.visible);
        assert_eq!(app.status, "Focus view closed: handheld in landscape");
    }

    #[test]
    fn empty_table_does_not_open_focus() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "[]").unwrap();
        let mut app = App::new(Some(path), Settings::default());
        app.open_focus_at_origin();
        assert!(!app.focus.visible);
        assert_eq!(app.status, "No rows to focus");
    }

    #[test]
    fn search_without_matches_does_not_open_focus() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(Some(write_table(dir.path())), Settings::default());
        app.table.search.start();
        for c in "zzz".chars() {
            app.table.search.input(c);
        }
        app.table.submit_search();
        assert_eq!(app.table.view_len(), 0);

        app.open_focus_at_selection();
        assert!(!app.focus.visible);
        assert_eq!(app.status, "No rows to focus");
    }
}
