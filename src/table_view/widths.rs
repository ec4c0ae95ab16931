//! Content-weighted column widths.

use crate::data::label::strip_markdown_links;
use crate::data::Row;

/// Narrowest column, in percent of the table width.
pub const MIN_WIDTH_PERCENT: u16 = 5;
/// Widest column, in percent of the table width.
pub const MAX_WIDTH_PERCENT: u16 = 40;

/// Percent width for each key in `keys`.
///
/// Each column is weighted by `log2` of its average plain-text length
/// (scaled by 10 and clamped to 10..=100), then given its share of 100%,
/// bounded by [`MIN_WIDTH_PERCENT`] and [`MAX_WIDTH_PERCENT`].
pub fn column_widths(rows: &[Row], keys: &[&str]) -> Vec<u16> {
    if keys.is_empty() {
        return Vec::new();
    }

    let weights: Vec<f64> = keys.iter().map(|key| length_weight(rows, key)).collect();
    let total: f64 = weights.iter().sum();

    weights
        .iter()
        .map(|w| {
            let share = if total > 0.0 {
                w / total
            } else {
                1.0 / keys.len() as f64
            };
            let percent = (share * 100.0).round() as u16;
            percent.clamp(MIN_WIDTH_PERCENT, MAX_WIDTH_PERCENT)
        })
        .collect()
}

fn length_weight(rows: &[Row], key: &str) -> f64 {
    let (chars, samples) = rows
        .iter()
        .map(|row| row.value(key))
        .filter(|value| !value.is_empty())
        .fold((0usize, 0usize), |(chars, samples), value| {
            let plain = strip_markdown_links(&value.to_string());
            (chars + plain.chars().count(), samples + 1)
        });

    let average = if samples > 0 {
        chars as f64 / samples as f64
    } else {
        0.0
    };
    let scaled = if average > 0.0 {
        average.log2() * 10.0
    } else {
        10.0
    };
    scaled.clamp(10.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_content_gets_more_room() {
        let rows = vec![
            Row::new().with("id", "1").with("text", "a fairly long description of the item"),
            Row::new().with("id", "2").with("text", "another long description, with more words"),
        ];
        let widths = column_widths(&rows, &["id", "text"]);
        assert_eq!(widths.len(), 2);
        assert!(widths[1] > widths[0]);
        assert!(widths[1] <= MAX_WIDTH_PERCENT);
    }

    #[test]
    fn many_columns_respect_minimum() {
        let rows = vec![Row::new().with("a", "x")];
        let keys: Vec<String> = (0..30).map(|i| format!("k{}", i)).collect();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let widths = column_widths(&rows, &refs);
        assert!(widths.iter().all(|w| *w == MIN_WIDTH_PERCENT));
    }

    #[test]
    fn links_count_only_their_text() {
        let plain = vec![Row::new().with("a", "docs")];
        let linked = vec![Row::new().with("a", "[docs](https://example.com/a/very/long/path)")];
        assert_eq!(length_weight(&plain, "a"), length_weight(&linked, "a"));
    }

    #[test]
    fn no_columns_no_widths() {
        assert!(column_widths(&[], &[]).is_empty());
    }
}
