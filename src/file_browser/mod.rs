//! File browser for picking a table file to open.
//!
//! Directories come first, then files. JSON tables are marked openable;
//! styling sidecars and other files are listed but cannot be opened.

pub mod ui;

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix of styling sidecar files.
const STYLING_SUFFIX: &str = ".styling.json";

/// File browser entry.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Full path to the entry.
    pub path: PathBuf,
    /// Display name (basename of path).
    pub name: String,
    /// Is this entry a directory (following symlinks)?
    pub is_dir: bool,
    /// Is this entry a symlink?
    pub is_symlink: bool,
    /// Can this entry be opened as a table?
    pub is_table: bool,
}

/// Check whether `path` looks like a table file.
pub fn is_table_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    name.ends_with(".json") && !name.ends_with(STYLING_SUFFIX)
}

/// File browser state.
#[derive(Debug)]
pub struct FileBrowserState {
    /// Current directory being browsed.
    pub current_dir: PathBuf,
    /// Entries in the current directory.
    pub entries: Vec<FileEntry>,
    /// Cursor position.
    pub cursor: usize,
    /// Scroll offset.
    pub scroll: usize,
    /// Show hidden dot-prefixed entries.
    pub show_hidden: bool,
}

impl FileBrowserState {
    /// Create a browser rooted at the working directory.
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::at(current_dir)
    }

    /// Create a browser rooted at `dir` (not loaded yet).
    pub fn at(dir: PathBuf) -> Self {
        Self {
            current_dir: dir,
            entries: Vec::new(),
            cursor: 0,
            scroll: 0,
            show_hidden: false,
        }
    }

    /// Load directory contents.
    pub fn load_directory(&mut self) {
        self.entries.clear();

        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(FileEntry {
                path: parent.to_path_buf(),
                name: "..".to_string(),
                is_dir: true,
                is_symlink: parent.is_symlink(),
                is_table: false,
            });
        }

        let dir_entries = match fs::read_dir(&self.current_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", self.current_dir.display(), e);
                return;
            },
        };

        for entry in dir_entries.flatten() {
            let path = entry.path();
            let name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();

            if !self.show_hidden && name.starts_with('.') {
                continue;
            }

            let is_symlink = path.is_symlink();
            let is_dir = path.metadata().map(|m| m.is_dir()).unwrap_or(false);
            let is_table = !is_dir && is_table_file(&path);

            self.entries.push(FileEntry {
                path,
                name,
                is_dir,
                is_symlink,
                is_table,
            });
        }

        self.entries.sort_by(|a, b| {
            if a.name == ".." {
                Ordering::Less
            } else if b.name == ".." {
                Ordering::Greater
            } else {
                match (a.is_dir, b.is_dir) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                }
            }
        });

        self.cursor = 0;
        self.scroll = 0;
    }

    /// Move cursor up.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor down.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Get the currently selected entry.
    pub fn current_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }

    /// Enter the selected directory, or return the selected table file.
    pub fn select_current(&mut self) -> Option<PathBuf> {
        let entry = self.current_entry()?.clone();

        if entry.is_dir {
            self.current_dir = entry.path;
            self.load_directory();
            None
        } else if entry.is_table {
            Some(entry.path)
        } else {
            None
        }
    }

    /// Navigate to parent directory.
    pub fn go_to_parent(&mut self) {
        if let Some(parent) = self.current_dir.parent() {
            self.current_dir = parent.to_path_buf();
            self.load_directory();
        }
    }

    /// Toggle show hidden files.
    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.load_directory();
    }

    /// Adjust scroll to keep cursor visible.
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        if self.cursor >= self.scroll + viewport_height {
            self.scroll = self.cursor + 1 - viewport_height;
        }
    }
}

impl Default for FileBrowserState {
    fn default() -> Self {
        Self::new()
    }
}
