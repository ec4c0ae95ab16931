//! Data reading and representation.
//!
//! This module handles reading exported sheet data and representing it as
//! columns and rows of scalar cell values.

pub mod label;
mod reader;
pub mod styling;
mod table;
mod value;

pub use reader::DataReader;
pub use styling::{CellStyle, ColumnShading, ShadingMap, StyleResolver};
pub use table::{Column, Dataset, Row};
pub use value::CellValue;
