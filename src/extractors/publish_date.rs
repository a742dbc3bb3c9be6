// src/extractors/publish_date.rs
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

pub const UNKNOWN_PUBLISH_DATE: &str = "Unknown";

/// `<meta>` attribute/value pairs that carry a publish date, highest
/// priority first. New sources are added here, not in the resolver.
pub const PUBLISH_DATE_META: &[(&str, &str)] = &[
    ("property", "article:published_time"),
    ("property", "og:published_time"),
    ("name", "date"),
    ("name", "pubdate"),
    ("name", "publish-date"),
    ("itemprop", "datePublished"),
];

static PUBLISH_DATE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    PUBLISH_DATE_META
        .iter()
        .map(|(attr, value)| format!("meta[{}=\"{}\"]", attr, value))
        .map(|css| Selector::parse(&css).expect("Failed to compile PUBLISH_DATE_SELECTORS"))
        .collect()
});

/// Reads the publish date declared in page metadata. The value is returned
/// verbatim; nothing here parses or validates dates.
pub struct PublishDateResolver;

impl PublishDateResolver {
    pub fn new() -> Self { Self {} }

    pub fn resolve(&self, html: &str) -> String {
        let document = Html::parse_document(html);
        self.resolve_document(&document)
    }

    /// Content of the first `<meta>` for the highest priority descriptor that
    /// has a non-empty `content`. Only the first element per descriptor is
    /// looked at.
    pub fn resolve_document(&self, document: &Html) -> String {
        let root = document.root_element();
        for (selector, (attr, value)) in PUBLISH_DATE_SELECTORS.iter().zip(PUBLISH_DATE_META) {
            let Some(meta) = root.select(selector).next() else {
                continue;
            };
            match meta.value().attr("content") {
                Some(content) if !content.is_empty() => {
                    tracing::debug!("Publish date from meta[{}={}]: {}", attr, value, content);
                    return content.to_string();
                }
                _ => tracing::trace!("meta[{}={}] present without content", attr, value),
            }
        }

        tracing::debug!("No publish date metadata found");
        UNKNOWN_PUBLISH_DATE.to_string()
    }
}

impl Default for PublishDateResolver {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_descriptor_compiles() {
        assert_eq!(PUBLISH_DATE_SELECTORS.len(), PUBLISH_DATE_META.len());
    }

    #[test]
    fn unknown_without_metadata() {
        let html = r#"<html><head><meta name="author" content="Jane"></head><body></body></html>"#;
        assert_eq!(PublishDateResolver::new().resolve(html), "Unknown");
    }

    #[test]
    fn article_published_time_beats_everything_else() {
        let html = r#"<html><head>
            <meta itemprop="datePublished" content="2020-01-01">
            <meta name="date" content="2021-02-02">
            <meta property="og:published_time" content="2022-03-03">
            <meta property="article:published_time" content=" 2023-10-10T08:00:00+00:00 ">
        </head><body></body></html>"#;

        assert_eq!(
            PublishDateResolver::new().resolve(html),
            " 2023-10-10T08:00:00+00:00 "
        );
    }

    #[test]
    fn empty_content_moves_on_to_next_descriptor() {
        let html = r#"<html><head>
            <meta property="article:published_time" content="">
            <meta property="og:published_time">
            <meta name="pubdate" content="Oct 10, 2023">
        </head></html>"#;

        assert_eq!(PublishDateResolver::new().resolve(html), "Oct 10, 2023");
    }

    #[test]
    fn itemprop_in_body_is_found() {
        let html = r#"<html><body><header><meta itemprop="datePublished" content="2024-05-06"></header></body></html>"#;
        assert_eq!(PublishDateResolver::new().resolve(html), "2024-05-06");
    }

    #[test]
    fn empty_content_everywhere_is_unknown() {
        let html = r#"<meta name="date" content=""><meta name="publish-date" content="">"#;
        assert_eq!(PublishDateResolver::new().resolve(html), UNKNOWN_PUBLISH_DATE);
    }
}
