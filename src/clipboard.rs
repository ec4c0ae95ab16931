//! Clipboard integration.

use crate::data::label::strip_markdown_links;
use crate::error::Result;
use arboard::Clipboard;

/// Copy cell text to the system clipboard.
///
/// Markdown links are copied as their link text.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let plain = strip_markdown_links(text);
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(plain.as_str())?;
    tracing::debug!("Copied {} characters to clipboard", plain.chars().count());
    Ok(())
}
