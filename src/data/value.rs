//! Cell values.

use serde_json::Value;
use std::fmt;

/// A single scalar stored in a table cell.
///
/// Absent cells read as [`CellValue::Null`]. Anything that is not a scalar in
/// the source payload (objects, arrays) is kept as its JSON text.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing or null value.
    #[default]
    Null,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
}

impl CellValue {
    /// Convert a JSON value into a cell value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map(Self::Number).unwrap_or(Self::Null),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }

    /// Convert raw spreadsheet text, turning numeric-looking strings into numbers.
    pub fn from_sheet_text(text: &str) -> Self {
        match parse_numeric(text) {
            Some(n) => Self::Number(n),
            None => Self::Text(text.to_string()),
        }
    }

    /// Check if the value is null or an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Check if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the value, if it holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Parse a spreadsheet string as a number.
///
/// Blank strings stay text.
fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_display_without_trailing_zero() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn null_displays_as_empty() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert!(CellValue::Null.is_empty());
        assert!(CellValue::from("").is_empty());
        assert!(!CellValue::from("x").is_empty());
    }

    #[test]
    fn nested_json_degrades_to_text() {
        let value = CellValue::from_json(&json!({"a": 1}));
        assert_eq!(value, CellValue::Text("{\"a\":1}".to_string()));
    }

    #[test]
    fn sheet_text_coerces_numbers() {
        assert_eq!(CellValue::from_sheet_text("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::from_sheet_text(" 1.5 "), CellValue::Number(1.5));
        assert_eq!(CellValue::from_sheet_text(""), CellValue::from(""));
        assert_eq!(CellValue::from_sheet_text("abc"), CellValue::from("abc"));
        assert_eq!(CellValue::from_sheet_text("inf"), CellValue::from("inf"));
    }
}
