//! Column label formatting and plain-text helpers.

/// Turn a column key into a display label.
///
/// Splits camelCase words and capitalises the first letter. Runs of capitals
/// (acronyms) are left intact: `userID` becomes `User ID`, `URLPath` stays
/// `URLPath`.
pub fn humanize(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;

    for c in key.chars() {
        if let Some(p) = prev {
            if p.is_ascii_lowercase() && c.is_ascii_uppercase() {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        },
        _ => out,
    }
}

/// Replace markdown links `[text](url)` with their text.
pub fn strip_markdown_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find("](") else {
            break;
        };
        let after_text = &after_open[close + 2..];
        let Some(end) = after_text.find(')') else {
            break;
        };

        out.push_str(&rest[..open]);
        out.push_str(&after_open[..close]);
        rest = &after_text[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Truncate at the first `(` and trim trailing whitespace.
pub fn strip_parenthetical(text: &str) -> &str {
    let head = match text.find('(') {
        Some(idx) => &text[..idx],
        None => text,
    };
    head.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_splits_camel_case() {
        assert_eq!(humanize("firstName"), "First Name");
        assert_eq!(humanize("userID"), "User ID");
        assert_eq!(humanize("URLPath"), "URLPath");
        assert_eq!(humanize("Notes"), "Notes");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn markdown_links_become_text() {
        assert_eq!(
            strip_markdown_links("see [docs](https://x.y) and [more](u)"),
            "see docs and more"
        );
        assert_eq!(strip_markdown_links("no [link here"), "no [link here");
        assert_eq!(strip_markdown_links("[a] (b)"), "[a] (b)");
    }

    #[test]
    fn parenthetical_is_stripped() {
        assert_eq!(strip_parenthetical("Eggs (large)"), "Eggs");
        assert_eq!(strip_parenthetical("(ignore) Bar"), "");
        assert_eq!(strip_parenthetical("  Plain  "), "Plain");
    }
}
