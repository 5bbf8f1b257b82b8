// file: src/normalizer/markdown.rs
// description: markdown cleanup steps applied before structural rewriting
// reference: CommonMark links, emphasis and list markers

use crate::normalizer::patterns::{BULLET_MARKER, EDGE_EMPHASIS, INLINE_EMPHASIS, MARKDOWN_LINK};

/// `[link text](url)` becomes `link text`.
pub fn remove_markdown_links(text: &str) -> String {
    MARKDOWN_LINK.replace_all(text, "${1}").into_owned()
}

pub fn strip_bullet_markers(text: &str) -> String {
    BULLET_MARKER.replace(text, "").into_owned()
}

/// Removes `*word*`, `**word**` and `***word***` without touching surrounding text.
pub fn strip_inline_emphasis(text: &str) -> String {
    INLINE_EMPHASIS.replace_all(text, "${1}").into_owned()
}

/// Removes dangling asterisks at either end and trims.
pub fn strip_edge_emphasis(text: &str) -> String {
    EDGE_EMPHASIS.replace_all(text, "").trim().to_string()
}

pub fn strip_emphasis(text: &str) -> String {
    strip_edge_emphasis(&strip_inline_emphasis(text))
}
