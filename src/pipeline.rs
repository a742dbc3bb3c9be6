// src/pipeline.rs
use std::sync::Arc;

use serde::Serialize;

use crate::extractors::{
    char_len, truncate_chars, BodyTextExtractor, EventList, EventListBuilder, ExtractionResult,
    PublishDateResolver, UNKNOWN_PUBLISH_DATE,
};
use crate::fetch::PageFetcher;
use crate::inference::{EntityRecognizer, Summarizer};
use crate::utils::error::InferenceError;

/// Below this many characters of body text nothing is analyzed.
pub const MIN_BODY_CHARS: usize = 50;
/// Input caps for the model collaborators.
pub const SUMMARY_INPUT_CHARS: usize = 4000;
pub const NER_INPUT_CHARS: usize = 1000;

pub const TOO_SHORT_MESSAGE: &str = "Article text too short to analyze.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleResult {
    pub summary: String,
    pub events: EventList,
    pub publish_date: String,
}

/// What a request produces: an analyzed article, or the error-shaped
/// result for pages without enough text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PipelineOutcome {
    Article(ArticleResult),
    Rejected { error: String },
}

impl PipelineOutcome {
    pub fn too_short() -> Self {
        PipelineOutcome::Rejected {
            error: TOO_SHORT_MESSAGE.to_string(),
        }
    }
}

/// Fetch, extract, summarize, tag. Holds only shared read-only parts, so one
/// pipeline serves any number of concurrent requests.
pub struct ExtractionPipeline {
    fetcher: Arc<dyn PageFetcher>,
    summarizer: Arc<dyn Summarizer>,
    recognizer: Arc<dyn EntityRecognizer>,
    body_extractor: BodyTextExtractor,
    date_resolver: PublishDateResolver,
    event_builder: EventListBuilder,
}

impl ExtractionPipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        summarizer: Arc<dyn Summarizer>,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            recognizer,
            body_extractor: BodyTextExtractor::new(),
            date_resolver: PublishDateResolver::new(),
            event_builder: EventListBuilder::default(),
        }
    }

    /// Runs the whole pipeline for one URL. Fetch failures degrade to "no
    /// content"; only model failures come back as errors.
    pub async fn run(&self, url: &str) -> Result<PipelineOutcome, InferenceError> {
        let page = match self.fetcher.fetch(url).await {
            Ok(page) => {
                tracing::info!("Fetched {} - Status: {}", page.url, page.status);
                Some(page)
            }
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", url, e);
                None
            }
        };

        self.analyze(page.as_ref().map(|p| p.html.as_str())).await
    }

    /// Analyzes already fetched markup. `None` means the fetch failed.
    pub async fn analyze(&self, markup: Option<&str>) -> Result<PipelineOutcome, InferenceError> {
        let extraction = match markup {
            Some(html) => self.body_extractor.extract_markup(html),
            None => ExtractionResult::empty(),
        };
        let body_text = extraction.body_text;

        let text_len = char_len(&body_text);
        if text_len < MIN_BODY_CHARS {
            tracing::info!(
                "Body text too short ({} chars, need {}), skipping analysis",
                text_len,
                MIN_BODY_CHARS
            );
            return Ok(PipelineOutcome::too_short());
        }

        let summary = self
            .summarizer
            .summarize(truncate_chars(&body_text, SUMMARY_INPUT_CHARS))
            .await?;

        let spans = self
            .recognizer
            .extract_entities(truncate_chars(&body_text, NER_INPUT_CHARS))
            .await?;
        let events = self.event_builder.build(&spans);

        // Metadata lives in the raw page; sanitizing could drop it
        let publish_date = markup
            .map(|html| self.date_resolver.resolve(html))
            .unwrap_or_else(|| UNKNOWN_PUBLISH_DATE.to_string());

        tracing::info!(
            "Analysis complete: {} events, publish date {}",
            events.len(),
            publish_date
        );
        Ok(PipelineOutcome::Article(ArticleResult {
            summary,
            events,
            publish_date,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchedPage;
    use crate::inference::EntitySpan;
    use crate::utils::error::FetchError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeFetcher {
        html: Option<String>,
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            match &self.html {
                Some(html) => Ok(FetchedPage {
                    url: url.to_string(),
                    status: 200,
                    html: html.clone(),
                }),
                None => Err(FetchError::Http(reqwest::StatusCode::NOT_FOUND)),
            }
        }
    }

    #[derive(Default)]
    struct FakeModels {
        summarize_calls: AtomicUsize,
        ner_calls: AtomicUsize,
        inputs: Mutex<Vec<usize>>,
        spans: Vec<EntitySpan>,
        fail_summary: bool,
    }

    #[async_trait]
    impl Summarizer for FakeModels {
        async fn summarize(&self, text: &str) -> Result<String, InferenceError> {
            self.summarize_calls.fetch_add(1, Ordering::SeqCst);
            self.inputs.lock().unwrap().push(char_len(text));
            if self.fail_summary {
                return Err(InferenceError::EmptyResponse);
            }
            Ok("A short summary.".to_string())
        }
    }

    #[async_trait]
    impl EntityRecognizer for FakeModels {
        async fn extract_entities(&self, text: &str) -> Result<Vec<EntitySpan>, InferenceError> {
            self.ner_calls.fetch_add(1, Ordering::SeqCst);
            self.inputs.lock().unwrap().push(char_len(text));
            Ok(self.spans.clone())
        }
    }

    fn pipeline(html: Option<String>, models: Arc<FakeModels>) -> ExtractionPipeline {
        ExtractionPipeline::new(
            Arc::new(FakeFetcher { html }),
            models.clone(),
            models,
        )
    }

    fn article_page(body: &str) -> String {
        format!(
            r#"<html><head><meta property="article:published_time" content="2023-10-10T08:00:00Z"></head>
            <body><nav>Menu</nav><article><p>{}</p></article></body></html>"#,
            body
        )
    }

    #[tokio::test]
    async fn full_article_produces_result() {
        let models = Arc::new(FakeModels {
            spans: vec![
                EntitySpan::new("Paris", "LOC"),
                EntitySpan::new("Paris", "LOC"),
                EntitySpan::new("UN", "ORG"),
                EntitySpan::new("Bob", "PER"),
            ],
            ..Default::default()
        });
        let body = "word ".repeat(2000);
        let p = pipeline(Some(article_page(&body)), models.clone());

        let outcome = p.run("https://example.com/story").await.unwrap();

        assert_eq!(
            outcome,
            PipelineOutcome::Article(ArticleResult {
                summary: "A short summary.".to_string(),
                events: vec!["Paris".to_string(), "UN".to_string()],
                publish_date: "2023-10-10T08:00:00Z".to_string(),
            })
        );
        assert_eq!(models.summarize_calls.load(Ordering::SeqCst), 1);
        assert_eq!(models.ner_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *models.inputs.lock().unwrap(),
            vec![SUMMARY_INPUT_CHARS, NER_INPUT_CHARS]
        );
    }

    #[tokio::test]
    async fn forty_nine_chars_short_circuits_without_model_calls() {
        let models = Arc::new(FakeModels::default());
        let text = "x".repeat(49);
        let html = format!("<html><body><div>{}</div></body></html>", text);
        let p = pipeline(Some(html), models.clone());

        for _ in 0..2 {
            let outcome = p.run("https://example.com/short").await.unwrap();
            assert_eq!(outcome, PipelineOutcome::too_short());
        }
        assert_eq!(models.summarize_calls.load(Ordering::SeqCst), 0);
        assert_eq!(models.ner_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fifty_chars_is_enough() {
        let models = Arc::new(FakeModels::default());
        let html = format!("<html><body><div>{}</div></body></html>", "y".repeat(50));
        let p = pipeline(Some(html), models.clone());

        let outcome = p.run("https://example.com/ok").await.unwrap();
        match outcome {
            PipelineOutcome::Article(article) => assert_eq!(article.publish_date, "Unknown"),
            other => panic!("expected article, got {:?}", other),
        }
        assert_eq!(models.summarize_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fetch_failure_is_reported_as_too_short() {
        let models = Arc::new(FakeModels::default());
        let p = pipeline(None, models.clone());

        let outcome = tokio_test::block_on(p.run("https://example.com/missing")).unwrap();
        assert_eq!(outcome, PipelineOutcome::too_short());
        assert_eq!(models.summarize_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn model_failure_propagates() {
        let models = Arc::new(FakeModels {
            fail_summary: true,
            ..Default::default()
        });
        let p = pipeline(Some(article_page(&"news ".repeat(40))), models.clone());

        let result = p.run("https://example.com/story").await;
        assert!(matches!(result, Err(InferenceError::EmptyResponse)));
        assert_eq!(models.ner_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn outcomes_serialize_to_service_shapes() {
        let rejected = serde_json::to_value(PipelineOutcome::too_short()).unwrap();
        assert_eq!(rejected, serde_json::json!({"error": "Article text too short to analyze."}));

        let article = serde_json::to_value(PipelineOutcome::Article(ArticleResult {
            summary: "s".to_string(),
            events: vec!["UN".to_string()],
            publish_date: "Unknown".to_string(),
        }))
        .unwrap();
        assert_eq!(
            article,
            serde_json::json!({"summary": "s", "events": ["UN"], "publish_date": "Unknown"})
        );
    }

    #[tokio::test]
    async fn publish_date_comes_from_unsanitized_markup() {
        let models = Arc::new(FakeModels::default());
        let html = format!(
            r#"<html><body>
                <header><meta itemprop="datePublished" content="2024-01-02"></header>
                <article>{}</article>
            </body></html>"#,
            "é".repeat(5000)
        );
        let p = pipeline(Some(html), models.clone());

        let outcome = p.run("https://example.com/story").await.unwrap();
        match outcome {
            PipelineOutcome::Article(article) => assert_eq!(article.publish_date, "2024-01-02"),
            other => panic!("expected article, got {:?}", other),
        }
        assert_eq!(
            *models.inputs.lock().unwrap(),
            vec![SUMMARY_INPUT_CHARS, NER_INPUT_CHARS]
        );
    }
}
