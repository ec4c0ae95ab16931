//! Configuration.
//!
//! Settings resolve in order: built-in defaults, then the TOML config file,
//! then command-line flags. The file lives at
//! `<config_dir>/tabfocus/config.toml` unless `--config` points elsewhere.
//! Every field in the file is optional.

use crate::app::Theme;
use crate::error::{Result, TabfocusError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Minimum width in pixels a column needs to be shown.
pub const DEFAULT_MIN_COLUMN_WIDTH: u32 = 120;
/// Approximate pixel width of one terminal cell.
pub const DEFAULT_CELL_WIDTH_PX: u32 = 8;
/// Approximate pixel height of one terminal cell.
pub const DEFAULT_CELL_HEIGHT_PX: u32 = 16;
/// How long a move's animation tag stays set.
pub const DEFAULT_ANIMATION_MS: u64 = 300;
/// Settle delay after an orientation-change signal.
pub const DEFAULT_ORIENTATION_DEBOUNCE_MS: u64 = 300;
/// Minimum drag distance, in terminal cells, that counts as a swipe.
pub const DEFAULT_SWIPE_MIN_DISTANCE: u16 = 2;
/// Longest drag that still counts as a swipe.
pub const DEFAULT_SWIPE_MAX_DURATION_MS: u64 = 500;
/// Widest viewport, in pixels, still treated as a handheld device.
pub const DEFAULT_COMPACT_MAX_WIDTH: u32 = 1024;

/// One row of the responsive breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Breakpoint {
    /// Largest viewport width (inclusive) this breakpoint applies to.
    pub width: u32,
    /// Most columns shown at or below `width`.
    pub max_columns: usize,
}

/// Built-in breakpoint table.
pub const DEFAULT_BREAKPOINTS: [Breakpoint; 5] = [
    Breakpoint { width: 575, max_columns: 2 },
    Breakpoint { width: 767, max_columns: 3 },
    Breakpoint { width: 991, max_columns: 4 },
    Breakpoint { width: 1199, max_columns: 5 },
    Breakpoint { width: 1399, max_columns: 7 },
];

// Sparse file representation

/// Config file contents.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    layout: LayoutSection,
    #[serde(default)]
    identifiers: IdentifierSection,
    #[serde(default)]
    viewer: ViewerSection,
    #[serde(default)]
    ui: UiSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct LayoutSection {
    min_column_width: Option<u32>,
    cell_width_px: Option<u32>,
    cell_height_px: Option<u32>,
    breakpoints: Option<Vec<Breakpoint>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct IdentifierSection {
    preferred_key: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct ViewerSection {
    animation_ms: Option<u64>,
    orientation_debounce_ms: Option<u64>,
    swipe_min_distance: Option<u16>,
    swipe_max_duration_ms: Option<u64>,
    compact_max_width: Option<u32>,
    user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct UiSection {
    theme: Option<String>,
}

// Resolved settings

/// Layout settings for the responsive table.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    /// Minimum pixel width per column.
    pub min_column_width: u32,
    /// Pixel width of one terminal cell.
    pub cell_width_px: u32,
    /// Pixel height of one terminal cell.
    pub cell_height_px: u32,
    /// Breakpoint table.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
            cell_height_px: DEFAULT_CELL_HEIGHT_PX,
            breakpoints: DEFAULT_BREAKPOINTS.to_vec(),
        }
    }
}

impl LayoutSettings {
    /// Convert a terminal size in cells to viewport pixels.
    pub fn viewport_px(&self, cols: u16, rows: u16) -> (u32, u32) {
        (
            u32::from(cols) * self.cell_width_px,
            u32::from(rows) * self.cell_height_px,
        )
    }
}

/// Focus viewer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    /// Lifetime of the animation direction tag.
    pub animation: Duration,
    /// Delay before re-checking orientation after an orientation change.
    pub orientation_debounce: Duration,
    /// Minimum swipe distance in cells.
    pub swipe_min_distance: u16,
    /// Maximum swipe duration.
    pub swipe_max_duration: Duration,
    /// Widest viewport treated as handheld.
    pub compact_max_width: u32,
    /// User agent reported by the hosting platform, if any.
    pub user_agent: Option<String>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            animation: Duration::from_millis(DEFAULT_ANIMATION_MS),
            orientation_debounce: Duration::from_millis(DEFAULT_ORIENTATION_DEBOUNCE_MS),
            swipe_min_distance: DEFAULT_SWIPE_MIN_DISTANCE,
            swipe_max_duration: Duration::from_millis(DEFAULT_SWIPE_MAX_DURATION_MS),
            compact_max_width: DEFAULT_COMPACT_MAX_WIDTH,
            user_agent: None,
        }
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    /// Table layout.
    pub layout: LayoutSettings,
    /// Focus viewer behavior.
    pub viewer: ViewerSettings,
    /// Column key preferred for row identifiers.
    pub preferred_key: Option<String>,
    /// Color theme.
    pub theme: Theme,
}

impl FileConfig {
    /// Parse config file contents.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| TabfocusError::config(path.to_path_buf(), e.to_string()))
    }

    /// Resolve the file over the built-in defaults.
    pub fn resolve(self) -> Settings {
        let defaults = Settings::default();

        let mut breakpoints = self
            .layout
            .breakpoints
            .unwrap_or(defaults.layout.breakpoints);
        breakpoints.sort_by_key(|bp| bp.width);

        let theme = match self.ui.theme.as_deref() {
            Some(name) => Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!("Unknown theme '{}', using default", name);
                defaults.theme
            }),
            None => defaults.theme,
        };

        Settings {
            layout: LayoutSettings {
                min_column_width: self
                    .layout
                    .min_column_width
                    .filter(|w| *w > 0)
                    .unwrap_or(DEFAULT_MIN_COLUMN_WIDTH),
                cell_width_px: self
                    .layout
                    .cell_width_px
                    .filter(|w| *w > 0)
                    .unwrap_or(DEFAULT_CELL_WIDTH_PX),
                cell_height_px: self
                    .layout
                    .cell_height_px
                    .filter(|h| *h > 0)
                    .unwrap_or(DEFAULT_CELL_HEIGHT_PX),
                breakpoints,
            },
            viewer: ViewerSettings {
                animation: self
                    .viewer
                    .animation_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.viewer.animation),
                orientation_debounce: self
                    .viewer
                    .orientation_debounce_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.viewer.orientation_debounce),
                swipe_min_distance: self
                    .viewer
                    .swipe_min_distance
                    .unwrap_or(DEFAULT_SWIPE_MIN_DISTANCE),
                swipe_max_duration: self
                    .viewer
                    .swipe_max_duration_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.viewer.swipe_max_duration),
                compact_max_width: self
                    .viewer
                    .compact_max_width
                    .unwrap_or(DEFAULT_COMPACT_MAX_WIDTH),
                user_agent: self.viewer.user_agent,
            },
            preferred_key: self.identifiers.preferred_key,
            theme,
        }
    }
}

/// Returns the default config file path.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tabfocus").join("config.toml"))
}

/// Load the config file.
///
/// An explicit path must exist. The default path is optional: when it is
/// missing the defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) if p.exists() => p,
            _ => {
                tracing::debug!("No config file, using defaults");
                return Ok(FileConfig::default());
            },
        },
    };

    let text =
        fs::read_to_string(&path).map_err(|e| TabfocusError::file_open(path.clone(), e))?;
    let config = FileConfig::parse(&text, &path)?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}
