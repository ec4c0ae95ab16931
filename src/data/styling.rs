//! Column shading hints and value-specific cell styles.
//!
//! Shading comes from an optional `<stem>.styling.json` file next to the data
//! file. Its keys are column keys; each entry may carry a base cell style and
//! a list of value-specific overrides that are matched against the cell value.

use super::{CellValue, Column};
use serde::Deserialize;
use std::collections::HashMap;

/// Styling hints for one column.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnShading {
    /// Style applied to every cell of the column.
    #[serde(default)]
    pub cell_style: CellStyle,
    /// Style applied to the column header.
    #[serde(default)]
    pub header_style: CellStyle,
    /// Overrides matched against the cell value, first match wins.
    #[serde(default)]
    pub value_specific_styles: Vec<ValueStyle>,
}

/// A style override guarded by a condition on the cell value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValueStyle {
    /// When to apply the style.
    pub condition: StyleCondition,
    /// Style to apply.
    #[serde(default)]
    pub style: CellStyle,
}

/// Condition on a cell value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleCondition {
    /// Matches when the value's text contains this substring.
    #[serde(default)]
    pub value_contains: Option<String>,
    /// Matches null or empty values.
    #[serde(default)]
    pub is_null_or_empty: bool,
}

impl StyleCondition {
    /// Check whether the condition holds for a value.
    pub fn matches(&self, value: &CellValue) -> bool {
        if let Some(ref needle) = self.value_contains {
            if value.to_string().contains(needle.as_str()) {
                return true;
            }
        }
        self.is_null_or_empty && value.is_empty()
    }
}

/// A small subset of CSS-like style properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    /// Foreground color (`#rrggbb` or a color name).
    #[serde(default)]
    pub color: Option<String>,
    /// Background color (`#rrggbb` or a color name).
    #[serde(default)]
    pub background_color: Option<String>,
    /// `bold` or `normal`.
    #[serde(default)]
    pub font_weight: Option<String>,
    /// `italic` or `normal`.
    #[serde(default)]
    pub font_style: Option<String>,
}

impl CellStyle {
    /// Overlay `other` on top of `self`, later values winning.
    pub fn merged(mut self, other: &CellStyle) -> Self {
        if other.color.is_some() {
            self.color = other.color.clone();
        }
        if other.background_color.is_some() {
            self.background_color = other.background_color.clone();
        }
        if other.font_weight.is_some() {
            self.font_weight = other.font_weight.clone();
        }
        if other.font_style.is_some() {
            self.font_style = other.font_style.clone();
        }
        self
    }

    /// Check if no property is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check if the style asks for bold text.
    pub fn is_bold(&self) -> bool {
        matches!(self.font_weight.as_deref(), Some("bold") | Some("700") | Some("800") | Some("900"))
    }

    /// Check if the style asks for italic text.
    pub fn is_italic(&self) -> bool {
        self.font_style.as_deref() == Some("italic")
    }
}

/// Shading map as stored in the styling file.
pub type ShadingMap = HashMap<String, ColumnShading>;

/// Resolves the style of a single cell.
///
/// Style resolution never affects navigation; the focus viewer only forwards
/// the result to the renderer.
pub trait StyleResolver {
    /// Style for `value` shown in `column`.
    fn resolve(&self, column: &Column, value: &CellValue) -> CellStyle;
}

/// Resolver driven by the column's shading hints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadingResolver;

impl StyleResolver for ShadingResolver {
    fn resolve(&self, column: &Column, value: &CellValue) -> CellStyle {
        let Some(ref shading) = column.shading else {
            return CellStyle::default();
        };

        let base = shading.cell_style.clone();
        match shading
            .value_specific_styles
            .iter()
            .find(|vs| vs.condition.matches(value))
        {
            Some(vs) => base.merged(&vs.style),
            None => base,
        }
    }
}

/// Resolver that never styles anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainResolver;

impl StyleResolver for PlainResolver {
    fn resolve(&self, _column: &Column, _value: &CellValue) -> CellStyle {
        CellStyle::default()
    }
}
