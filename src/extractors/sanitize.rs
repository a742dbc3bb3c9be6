// src/extractors/sanitize.rs
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Tags removed, subtree and all, before any extraction strategy runs.
pub const STRIPPED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "noscript",
];

static STRIPPED_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(&STRIPPED_TAGS.join(", ")).expect("Failed to compile STRIPPED_SELECTOR")
});

pub struct HtmlSanitizer;

impl HtmlSanitizer {
    pub fn new() -> Self { Self {} }

    /// Detaches every non-content element from the tree. Running it again on
    /// the same document finds nothing to remove.
    pub fn sanitize(&self, document: &mut Html) {
        // Select from the root element rather than the arena, so subtrees
        // that are already detached are not matched again.
        let ids: Vec<_> = document
            .root_element()
            .select(&STRIPPED_SELECTOR)
            .map(|element| element.id())
            .collect();

        for id in &ids {
            if let Some(mut node) = document.tree.get_mut(*id) {
                node.detach();
            }
        }

        tracing::debug!("Sanitizer removed {} non-content elements", ids.len());
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self { Self::new() }
}
