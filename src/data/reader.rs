//! Table file reader.

use super::{CellValue, Dataset, Row, ShadingMap};
use crate::error::{Result, TabfocusError};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Reader for exported sheet data.
#[derive(Debug)]
pub struct DataReader;

impl DataReader {
    /// Read a table file and its optional styling sidecar.
    pub fn read_file(path: &Path) -> Result<Dataset> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "json" => {},
            other => return Err(TabfocusError::unsupported_format(other)),
        }

        let text =
            fs::read_to_string(path).map_err(|e| TabfocusError::file_open(path.to_path_buf(), e))?;
        let fallback_title = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Table".to_string());

        let mut dataset = Self::parse_str(&text, &fallback_title)?;
        dataset.source = Some(path.to_path_buf());

        if let Some(shading) = Self::read_styling(path) {
            for column in &mut dataset.columns {
                column.shading = shading.get(&column.key).cloned();
            }
        }

        tracing::info!(
            "Loaded {} rows x {} columns from {}",
            dataset.row_count(),
            dataset.column_count(),
            path.display()
        );

        Ok(dataset)
    }

    /// Parse a JSON payload into a dataset.
    ///
    /// Accepts a bare array of row objects, an object wrapping such an array
    /// under `data` or `rows`, or raw spreadsheet values under `values`.
    pub fn parse_str(text: &str, fallback_title: &str) -> Result<Dataset> {
        let value: Value = serde_json::from_str(text)?;

        let title = value
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(fallback_title)
            .to_string();

        match value {
            Value::Array(items) => Self::from_objects(title, &items),
            Value::Object(ref map) => {
                if let Some(Value::Array(items)) = map.get("rows") {
                    Self::from_objects(title, items)
                } else if let Some(Value::Array(items)) = map.get("data") {
                    tracing::warn!("Payload wraps rows in a 'data' object; using it");
                    Self::from_objects(title, items)
                } else if let Some(Value::Array(values)) = map.get("values") {
                    Self::from_values(title, values)
                } else {
                    Err(TabfocusError::unexpected_format(
                        "expected an array of rows or an object with 'rows', 'data' or 'values'",
                    ))
                }
            },
            _ => Err(TabfocusError::unexpected_format(
                "top-level JSON value is not an array or object",
            )),
        }
    }

    fn from_objects(title: String, items: &[Value]) -> Result<Dataset> {
        let mut rows = Vec::with_capacity(items.len());
        let mut keys: Vec<String> = Vec::new();

        for (idx, item) in items.iter().enumerate() {
            let Value::Object(map) = item else {
                return Err(TabfocusError::unexpected_format(format!(
                    "row {} is not an object",
                    idx + 1
                )));
            };
            if idx == 0 {
                keys = map.keys().cloned().collect();
            }
            rows.push(Self::row_from_map(map));
        }

        Ok(Dataset::new(title, keys, rows))
    }

    fn row_from_map(map: &Map<String, Value>) -> Row {
        let mut row = Row::new();
        for (key, value) in map {
            row.insert(key.clone(), CellValue::from_json(value));
        }
        row
    }

    fn from_values(title: String, values: &[Value]) -> Result<Dataset> {
        let Some((header, body)) = values.split_first() else {
            return Ok(Dataset::new(title, Vec::new(), Vec::new()));
        };

        let Value::Array(header) = header else {
            return Err(TabfocusError::unexpected_format("heading row is not an array"));
        };
        let keys = Self::heading_keys(header);

        let mut rows = Vec::with_capacity(body.len());
        for (idx, entry) in body.iter().enumerate() {
            let Value::Array(entry) = entry else {
                return Err(TabfocusError::unexpected_format(format!(
                    "values row {} is not an array",
                    idx + 2
                )));
            };

            let mut row = Row::new();
            // Sheets trims trailing empty cells, so entries may be shorter than the heading.
            for (key, cell) in keys.iter().zip(entry.iter()) {
                let value = match cell {
                    Value::String(s) => CellValue::from_sheet_text(s),
                    other => CellValue::from_json(other),
                };
                row.insert(key.clone(), value);
            }
            rows.push(row);
        }

        Ok(Dataset::new(title, keys, rows))
    }

    /// Column keys for a heading row: blank headings become `column_N`
    /// (1-based position) and repeats get a `_2`, `_3`... suffix.
    fn heading_keys(header: &[Value]) -> Vec<String> {
        let mut keys: Vec<String> = Vec::with_capacity(header.len());
        for (idx, cell) in header.iter().enumerate() {
            let text = Self::sheet_text(cell);
            let base = match text.trim() {
                "" => format!("column_{}", idx + 1),
                trimmed => trimmed.to_string(),
            };
            let mut key = base.clone();
            let mut n = 2;
            while keys.contains(&key) {
                key = format!("{}_{}", base, n);
                n += 1;
            }
            if key != base {
                tracing::warn!("Repeated heading '{}' renamed to '{}'", base, key);
            }
            keys.push(key);
        }
        keys
    }

    fn sheet_text(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => CellValue::from_json(other).to_string(),
        }
    }

    /// Path of the styling sidecar for a data file.
    pub fn styling_path(path: &Path) -> PathBuf {
        path.with_extension("styling.json")
    }

    fn read_styling(path: &Path) -> Option<ShadingMap> {
        let styling_path = Self::styling_path(path);
        let text = match fs::read_to_string(&styling_path) {
            Ok(text) => text,
            Err(_) => {
                tracing::debug!("No styling file at {}", styling_path.display());
                return None;
            },
        };

        match serde_json::from_str::<ShadingMap>(&text) {
            Ok(map) => {
                tracing::info!("Loaded styling from {}", styling_path.display());
                Some(map)
            },
            Err(e) => {
                tracing::warn!("Ignoring styling file {}: {}", styling_path.display(), e);
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_array_of_objects_in_key_order() {
        let dataset =
            DataReader::parse_str(r#"[{"zeta": 1, "alpha": "a"}, {"zeta": 2}]"#, "t").unwrap();
        let keys: Vec<&str> = dataset.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows[1].value("alpha"), &CellValue::Null);
        assert_eq!(dataset.title, "t");
    }

    #[test]
    fn reads_proxy_response_with_title() {
        let dataset = DataReader::parse_str(
            r#"{"title": "Menu", "rows": [{"name": "Eggs"}], "columns": {"name": ["Eggs"]}}"#,
            "fallback",
        )
        .unwrap();
        assert_eq!(dataset.title, "Menu");
        assert_eq!(dataset.rows[0].value("name"), &CellValue::from("Eggs"));
    }

    #[test]
    fn reads_data_wrapper() {
        let dataset = DataReader::parse_str(r#"{"data": [{"a": 1}]}"#, "t").unwrap();
        assert_eq!(dataset.row_count(), 1);
    }

    #[test]
    fn reads_raw_sheet_values() {
        let dataset = DataReader::parse_str(
            r#"{"values": [["name", "qty", "note"], ["Eggs", "12"], ["Milk", "1", "cold"]]}"#,
            "t",
        )
        .unwrap();
        assert_eq!(dataset.column_count(), 3);
        assert_eq!(dataset.rows[0].value("qty"), &CellValue::Number(12.0));
        assert!(dataset.rows[0].get("note").is_none());
        assert_eq!(dataset.rows[1].value("note"), &CellValue::from("cold"));
    }

    #[test]
    fn repeated_and_blank_headings_get_unique_keys() {
        let dataset = DataReader::parse_str(
            r#"{"values": [["name", "name", ""], ["a", "b", "c"]]}"#,
            "t",
        )
        .unwrap();
        let keys: Vec<&str> = dataset.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "name_2", "column_3"]);
        assert_eq!(dataset.rows[0].value("name"), &CellValue::from("a"));
        assert_eq!(dataset.rows[0].value("name_2"), &CellValue::from("b"));
        assert_eq!(dataset.rows[0].value("column_3"), &CellValue::from("c"));
    }

    #[test]
    fn rejects_scalars_and_unknown_objects() {
        assert!(matches!(
            DataReader::parse_str("42", "t"),
            Err(TabfocusError::UnexpectedFormat { .. })
        ));
        assert!(matches!(
            DataReader::parse_str(r#"{"foo": 1}"#, "t"),
            Err(TabfocusError::UnexpectedFormat { .. })
        ));
        assert!(matches!(
            DataReader::parse_str(r#"[1, 2]"#, "t"),
            Err(TabfocusError::UnexpectedFormat { .. })
        ));
        assert!(matches!(
            DataReader::parse_str("not json", "t"),
            Err(TabfocusError::Json(_))
        ));
    }

    #[test]
    fn empty_array_is_an_empty_table() {
        let dataset = DataReader::parse_str("[]", "t").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.column_count(), 0);
    }

    #[test]
    fn styling_sidecar_path() {
        assert_eq!(
            DataReader::styling_path(Path::new("/tmp/menu.json")),
            PathBuf::from("/tmp/menu.styling.json")
        );
    }
}
