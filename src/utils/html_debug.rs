// src/utils/html_debug.rs
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::error::AppError;

/// Markup worth seeing when a page extracts badly: the cascade's candidate
/// containers and the publish-date meta tags.
const DEBUG_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)<article\b[^>]*>", "article"),
    (
        r#"(?i)<div\b[^>]*(?:id|class)=['"]?[^'">]*\b(?:content|main|story-body|article-body|post-content|entry-content)\b[^>]*>"#,
        "content",
    ),
    (r"(?i)<p\b[^>]*>", "paragraph"),
    (r"(?i)<body\b[^>]*>", "body"),
    (
        r#"(?i)<meta\b[^>]*(?:article:published_time|og:published_time|name=['"]?(?:date|pubdate|publish-date)['"]?|datePublished)[^>]*>"#,
        "date",
    ),
    (r"(?i)<(?:script|style|nav|footer|header|aside|noscript)\b[^>]*>", "stripped"),
];

static DEBUG_REGEXES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    DEBUG_PATTERNS
        .iter()
        .map(|(pat, kind)| (Regex::new(pat).expect("Failed to compile DEBUG_PATTERNS"), *kind))
        .collect()
});

/// Wraps every highlight range of `html` in a styled span. Ranges that
/// overlap an earlier one are dropped.
pub fn annotate_html(html: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    debug_html.push_str(".highlight-article { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-content { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-paragraph { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-date { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0);

    for (start, end, highlight_type) in sorted_highlights {
        if start < last_pos || end > html.len() {
            continue;
        }
        debug_html.push_str(&html[last_pos..start]);

        let css_class = match highlight_type {
            "article" => "highlight-article",
            "content" => "highlight-content",
            "paragraph" => "highlight-paragraph",
            "date" => "highlight-date",
            _ => "highlight-custom",
        };

        debug_html.push_str(&format!(
            "<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type
        ));
        // Escaped so the tag shows up as text instead of being rendered
        debug_html.push_str(&html[start..end].replace('<', "&lt;").replace('>', "&gt;"));
        debug_html.push_str("</span>");

        last_pos = end;
    }

    debug_html.push_str(&html[last_pos..]);
    debug_html.push_str("\n</body>\n</html>");
    debug_html
}

/// Finds every debug pattern in a page.
pub fn find_highlights(html: &str) -> Vec<(usize, usize, &'static str)> {
    DEBUG_REGEXES
        .iter()
        .flat_map(|(re, kind)| re.find_iter(html).map(move |m| (m.start(), m.end(), *kind)))
        .collect()
}

/// Writes `raw_page.html` and `page_annotated.html` into `dir`.
pub fn dump_page(dir: &Path, html: &str) -> Result<(PathBuf, PathBuf), AppError> {
    fs::create_dir_all(dir)?;

    let raw_path = dir.join("raw_page.html");
    fs::write(&raw_path, html)?;

    let annotated_path = dir.join("page_annotated.html");
    fs::write(&annotated_path, annotate_html(html, &find_highlights(html)))?;

    tracing::info!(
        "Saved debug pages to {} and {}",
        raw_path.display(),
        annotated_path.display()
    );
    Ok((raw_path, annotated_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_debug_pattern_compiles() {
        assert_eq!(DEBUG_REGEXES.len(), DEBUG_PATTERNS.len());
    }

    #[test]
    fn finds_candidate_containers_and_date_tags() {
        let html = r#"<html><head><meta property="article:published_time" content="2024-01-01"></head>
            <body><article><p>Hi</p></article><div class="post-content">x</div></body></html>"#;
        let kinds: Vec<&str> = find_highlights(html).into_iter().map(|h| h.2).collect();

        assert!(kinds.contains(&"date"));
        assert!(kinds.contains(&"article"));
        assert!(kinds.contains(&"content"));
        assert!(kinds.contains(&"paragraph"));
        assert!(kinds.contains(&"body"));
    }

    #[test]
    fn overlapping_highlights_are_skipped() {
        let html = "<p>abc</p>";
        let out = annotate_html(html, &[(0, 3, "paragraph"), (1, 4, "custom")]);

        assert_eq!(out.matches("<span").count(), 1);
        assert!(out.contains("&lt;p&gt;"));
        assert!(out.contains("abc</p>"));
    }
}
