// src/extractors/body.rs

// --- Imports ---
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Serialize;

use crate::extractors::sanitize::HtmlSanitizer;
use crate::extractors::{char_len, visible_text};

// --- Constants ---
// Acceptance thresholds, in characters. A strategy must produce strictly more.
pub const ARTICLE_MIN_CHARS: usize = 100;
pub const CONTENT_DIV_MIN_CHARS: usize = 100;
pub const PARAGRAPHS_MIN_CHARS: usize = 50;

/// `id`/`class` values that mark the main content container of a page.
pub const CONTENT_CONTAINER_NAMES: &[&str] = &[
    "content",
    "main",
    "story-body",
    "article-body",
    "post-content",
    "entry-content",
];

// --- CSS Selectors (Lazy Static) ---
static ARTICLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article").expect("Failed to compile ARTICLE_SELECTOR"));

static CONTENT_DIV_ID_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    let list = CONTENT_CONTAINER_NAMES
        .iter()
        .map(|name| format!("div[id=\"{}\"]", name))
        .collect::<Vec<_>>()
        .join(", ");
    Selector::parse(&list).expect("Failed to compile CONTENT_DIV_ID_SELECTOR")
});

// `[class~=x]` matches x as one of the space separated class tokens
static CONTENT_DIV_CLASS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    let list = CONTENT_CONTAINER_NAMES
        .iter()
        .map(|name| format!("div[class~=\"{}\"]", name))
        .collect::<Vec<_>>()
        .join(", ");
    Selector::parse(&list).expect("Failed to compile CONTENT_DIV_CLASS_SELECTOR")
});

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Failed to compile PARAGRAPH_SELECTOR"));

static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("Failed to compile BODY_SELECTOR"));

// --- Data Structures ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionStrategy {
    ArticleTag,
    ContentDiv,
    Paragraphs,
    BodyFallback,
    None,
}

/// Output of the cascade. `body_text` is empty exactly when
/// `strategy_used` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub body_text: String,
    pub strategy_used: ExtractionStrategy,
}

impl ExtractionResult {
    pub fn empty() -> Self {
        Self {
            body_text: String::new(),
            strategy_used: ExtractionStrategy::None,
        }
    }
}

/// One step of the cascade: its text when it accepts the document.
type StrategyFn = fn(&Html) -> Option<String>;

/// Tried in order, first acceptance wins.
const CASCADE: &[(ExtractionStrategy, StrategyFn)] = &[
    (ExtractionStrategy::ArticleTag, article_tag),
    (ExtractionStrategy::ContentDiv, content_div),
    (ExtractionStrategy::Paragraphs, paragraphs),
    (ExtractionStrategy::BodyFallback, body_fallback),
];

// --- Strategies ---

/// Text of the first `<article>`, if long enough. Later articles are not tried.
pub fn article_tag(document: &Html) -> Option<String> {
    let article = document.root_element().select(&ARTICLE_SELECTOR).next()?;
    let text = visible_text(article);
    (char_len(&text) > ARTICLE_MIN_CHARS).then_some(text)
}

/// Text of the first content `<div>`. A div matched by id shadows any
/// matched by class, even when its text turns out too short.
pub fn content_div(document: &Html) -> Option<String> {
    let root = document.root_element();
    let div = root
        .select(&CONTENT_DIV_ID_SELECTOR)
        .next()
        .or_else(|| root.select(&CONTENT_DIV_CLASS_SELECTOR).next())?;
    let text = visible_text(div);
    (char_len(&text) > CONTENT_DIV_MIN_CHARS).then_some(text)
}

/// Raw text of every `<p>` in document order, joined by single spaces.
pub fn paragraphs(document: &Html) -> Option<String> {
    let text = document
        .root_element()
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");
    (char_len(&text) > PARAGRAPHS_MIN_CHARS).then_some(text)
}

/// All visible text of `<body>`, whatever its length. The parser always
/// synthesizes a body, so a body without any visible text counts as absent.
pub fn body_fallback(document: &Html) -> Option<String> {
    let body = document.root_element().select(&BODY_SELECTOR).next()?;
    let text = visible_text(body);
    (!text.is_empty()).then_some(text)
}

// --- Main Extractor Structure ---
pub struct BodyTextExtractor {
    sanitizer: HtmlSanitizer,
}

impl BodyTextExtractor {
    pub fn new() -> Self {
        Self {
            sanitizer: HtmlSanitizer::new(),
        }
    }

    /// Runs the cascade over an already sanitized document.
    pub fn extract(&self, document: &Html) -> ExtractionResult {
        for (strategy, run) in CASCADE {
            if let Some(body_text) = run(document) {
                tracing::debug!(
                    "Strategy {:?} succeeded: {} chars",
                    strategy,
                    char_len(&body_text)
                );
                return ExtractionResult {
                    body_text,
                    strategy_used: *strategy,
                };
            }
            tracing::trace!("Strategy {:?} rejected the document", strategy);
        }

        tracing::warn!("No extraction strategy found any body text");
        ExtractionResult::empty()
    }

    /// Parses and sanitizes raw markup, then runs the cascade. The parsed
    /// document is dropped before returning.
    pub fn extract_markup(&self, html: &str) -> ExtractionResult {
        let mut document = Html::parse_document(html);
        self.sanitizer.sanitize(&mut document);
        let result = self.extract(&document);
        tracing::info!(
            "Extracted {} chars of body text via {:?}",
            char_len(&result.body_text),
            result.strategy_used
        );
        result
    }
}

impl Default for BodyTextExtractor {
    fn default() -> Self { Self::new() }
}
