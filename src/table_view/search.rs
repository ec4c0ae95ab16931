//! Row search.

use crate::data::Row;

/// Search state.
///
/// Typing edits a buffer; submitting turns it into the active query that
/// filters rows.
#[derive(Debug, Default)]
pub struct SearchState {
    is_active: bool,
    buffer: String,
    query: String,
}

impl SearchState {
    /// Create a new search state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the search prompt is open.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Open the prompt, seeded with the current query.
    pub fn start(&mut self) {
        self.is_active = true;
        self.buffer = self.query.clone();
    }

    /// Add a character to the search buffer.
    pub fn input(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character from the search buffer.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Apply the buffer as the query. An empty buffer clears the filter.
    pub fn submit(&mut self) {
        self.query = std::mem::take(&mut self.buffer).trim().to_string();
        self.is_active = false;
    }

    /// Close the prompt without changing the query.
    pub fn cancel(&mut self) {
        self.is_active = false;
        self.buffer.clear();
    }

    /// Drop the active query.
    pub fn clear(&mut self) {
        self.query.clear();
        self.buffer.clear();
        self.is_active = false;
    }

    /// Get the search buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Get the active query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Check if a row passes the active query.
    pub fn matches(&self, row: &Row) -> bool {
        row_matches(row, &self.query)
    }
}

/// Case-insensitive substring match over every value in the row.
pub fn row_matches(row: &Row, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    row.values()
        .any(|value| value.to_string().to_lowercase().contains(&needle))
}
