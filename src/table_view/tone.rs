//! Yes/no cell tone.

use crate::data::label::strip_markdown_links;

/// Colouring hint for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTone {
    /// Answer reads as yes.
    Positive,
    /// Answer reads as a plain no.
    Negative,
    /// Anything else.
    Neutral,
}

/// Classify cell text.
///
/// Text starting with "yes" is positive. Text starting with "no" is negative
/// unless "but" appears within its first two sentences.
pub fn cell_tone(text: &str) -> CellTone {
    let plain = strip_markdown_links(text);
    let lower = plain.to_lowercase();

    if lower.starts_with("yes") {
        return CellTone::Positive;
    }
    if !lower.starts_with("no") {
        return CellTone::Neutral;
    }

    let scope = &lower[..two_sentence_end(&lower)];
    if scope.contains("but") {
        CellTone::Neutral
    } else {
        CellTone::Negative
    }
}

/// Byte offset just past the second sentence terminator (or the first, or
/// the end of the text).
fn two_sentence_end(text: &str) -> usize {
    text.char_indices()
        .filter(|(_, c)| matches!(c, '.' | '!' | '?'))
        .take(2)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_and_no_prefixes() {
        assert_eq!(cell_tone("Yes, always"), CellTone::Positive);
        assert_eq!(cell_tone("No."), CellTone::Negative);
        assert_eq!(cell_tone("Maybe"), CellTone::Neutral);
        assert_eq!(cell_tone(""), CellTone::Neutral);
    }

    #[test]
    fn but_within_two_sentences_softens_no() {
        assert_eq!(cell_tone("No. But see the appendix."), CellTone::Neutral);
        assert_eq!(cell_tone("No, but only in winter"), CellTone::Neutral);
        assert_eq!(
            cell_tone("No. Never. Though there is a but later."),
            CellTone::Negative
        );
    }

    #[test]
    fn links_are_ignored() {
        assert_eq!(cell_tone("[Yes](https://example.com)"), CellTone::Positive);
    }
}
