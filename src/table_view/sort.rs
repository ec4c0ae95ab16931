//! Row sorting.

use crate::data::{CellValue, Row};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Arrow shown next to the sorted column header.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// Column key being sorted on.
    pub key: Option<String>,
    /// Direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Sort on `key`; sorting the same key again flips the direction.
    pub fn toggle(&mut self, key: &str) {
        self.direction = if self.key.as_deref() == Some(key)
            && self.direction == SortDirection::Ascending
        {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.key = Some(key.to_string());
    }

    /// Stable-sort `indices` (into `rows`) by the current state.
    pub fn apply(&self, rows: &[Row], indices: &mut [usize]) {
        let Some(ref key) = self.key else {
            return;
        };
        indices.sort_by(|&a, &b| compare_cells(rows[a].value(key), rows[b].value(key), self.direction));
    }
}

/// Compare two cells; nulls sort last in either direction.
pub fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {},
    }

    let ordering = match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => natural_cmp(&a.to_string(), &b.to_string()),
    };

    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Case-insensitive comparison that orders digit runs by numeric value.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let l = take_digits(&mut left);
                let r = take_digits(&mut right);
                let ordering = compare_digit_runs(&l, &r);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            },
            (Some(x), Some(y)) => {
                let ordering = x.to_lowercase().cmp(y.to_lowercase());
                if ordering != Ordering::Equal {
                    return ordering;
                }
                left.next();
                right.next();
            },
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_handles_numbers_and_case() {
        assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
        assert_eq!(natural_cmp("Apple", "apple"), Ordering::Equal);
        assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(natural_cmp("a007", "a7"), Ordering::Equal);
        assert_eq!(natural_cmp("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn nulls_sort_last_both_ways() {
        let rows = vec![
            Row::new().with("n", 3.0),
            Row::new(),
            Row::new().with("n", 1.0),
            Row::new().with("n", 2.0),
        ];
        let mut state = SortState::default();
        state.toggle("n");
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        state.apply(&rows, &mut indices);
        assert_eq!(indices, vec![2, 3, 0, 1]);

        state.toggle("n");
        assert_eq!(state.direction, SortDirection::Descending);
        state.apply(&rows, &mut indices);
        assert_eq!(indices, vec![0, 3, 2, 1]);
    }

    #[test]
    fn mixed_values_compare_as_text() {
        assert_eq!(
            compare_cells(&CellValue::from("10"), &CellValue::Number(9.0), SortDirection::Ascending),
            Ordering::Greater
        );
        assert_eq!(
            compare_cells(&CellValue::from("b"), &CellValue::from("A"), SortDirection::Descending),
            Ordering::Less
        );
    }

    #[test]
    fn sorting_a_new_key_starts_ascending() {
        let mut state = SortState::default();
        state.toggle("a");
        state.toggle("a");
        state.toggle("b");
        assert_eq!(state.key.as_deref(), Some("b"));
        assert_eq!(state.direction, SortDirection::Ascending);
    }
}
