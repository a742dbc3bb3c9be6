// src/extractors/mod.rs
pub mod body;
pub mod events;
pub mod publish_date;
pub mod sanitize;

use scraper::ElementRef;

// Re-export key types for convenience
#[allow(unused_imports)]
pub use body::{BodyTextExtractor, ExtractionResult, ExtractionStrategy};
pub use events::{EventList, EventListBuilder};
pub use publish_date::{PublishDateResolver, UNKNOWN_PUBLISH_DATE};
pub use sanitize::HtmlSanitizer;

/// Every text node under `element`, trimmed, empties dropped, joined by a
/// single space.
pub fn visible_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Length in characters, not bytes. All thresholds are expressed in these.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
