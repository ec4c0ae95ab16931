//! tabfocus - a terminal table viewer with single-cell focus navigation.
//!
//! Tables exported from spreadsheets are shown as a responsive table whose
//! column count follows the viewport width. From any cell, a focus viewer
//! shows that one cell full screen with previews of its four neighbours,
//! navigated with arrow keys, swipes (mouse drags) or taps on a preview.
//!
//! # Features
//!
//! - JSON row arrays, sheet proxy payloads and raw sheet values
//! - Responsive column visibility with configurable breakpoints
//! - Search, natural sort and per-column visibility toggles
//! - Focus viewer with animation tags and handheld landscape auto-close
//! - Optional per-column styling sidecar
//! - Gruvbox color themes and clipboard integration
//!
//! # Example
//!
//! ```ignore
//! use tabfocus::data::DataReader;
//! use tabfocus::focus_viewer::{FocusCoordinate, FocusEngine, TableExtent};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! let dataset = DataReader::read_file(Path::new("menu.json"))?;
//! let extent = TableExtent::new(dataset.row_count(), dataset.column_count());
//! let mut engine = FocusEngine::new(FocusCoordinate::default(), extent, Duration::from_millis(300));
//! engine.move_right();
//! println!("Focus at {:?}", engine.focus());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod clipboard;
pub mod config;
pub mod data;
pub mod error;
pub mod file_browser;
pub mod focus_viewer;
pub mod summary;
pub mod table_view;
pub mod ui;

pub use error::{Result, TabfocusError};
