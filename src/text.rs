//! Helpful utilities for working with text.

use htmlentity::entity::{self, ICodedDataTrait};

/// Converts HTML entities into their single-character equivalents.
///
/// The X API returns "&" as "&amp;", ">" as "&gt;", and "<" as "&lt;"
/// in post text; this function converts those HTML entities into single,
/// human-readable characters.
///
/// Leading and trailing whitespace will also be trimmed from the string.
///
/// # Examples
///
/// ```
/// use birdwatch::text::convert_html_entities;
/// let raw = "fearless concurrency &amp; zero-cost abstractions";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, "fearless concurrency & zero-cost abstractions");
/// ```
///
/// ```
/// use birdwatch::text::convert_html_entities;
/// let raw = "  &lt;plain post&gt;  ";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, "<plain post>");
/// ```
///
/// ```
/// use birdwatch::text::convert_html_entities;
/// let raw = "no entities here";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, raw);
/// ```
pub fn convert_html_entities(text: &str) -> String {
    let text = text.trim();
    entity::decode(text.as_bytes())
        .to_string()
        .unwrap_or(text.to_string())
}
