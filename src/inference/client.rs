// src/inference/client.rs
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::inference::models::{
    EntitySpan, GroupedEntity, SummarizationOutput, SummarizationParameters, SummarizationRequest,
    TokenClassificationParameters, TokenClassificationRequest,
};
use crate::inference::{EntityRecognizer, Summarizer};
use crate::utils::error::InferenceError;

pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_SUMMARY_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_NER_MODEL: &str = "dslim/bert-base-NER";
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 60;

// Cap on how much of an error body ends up in logs and error messages
const ERROR_BODY_SNIPPET: usize = 512;

/// Settings for the hosted inference endpoint.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub base_url: String,
    pub summary_model: String,
    pub ner_model: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_INFERENCE_URL.to_string(),
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            ner_model: DEFAULT_NER_MODEL.to_string(),
            api_token: None,
            timeout_secs: DEFAULT_INFERENCE_TIMEOUT_SECS,
        }
    }
}

/// Summarization and NER backed by a Hugging Face style inference API.
/// Holds no per-request state, so one instance serves every request.
pub struct HfInference {
    client: reqwest::Client,
    config: InferenceConfig,
}

impl HfInference {
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: InferenceConfig) -> Self {
        Self { client, config }
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), model)
    }

    fn transport_error(&self, e: reqwest::Error) -> InferenceError {
        if e.is_timeout() {
            InferenceError::Timeout(self.config.timeout_secs)
        } else {
            InferenceError::Network(e)
        }
    }

    async fn post_json<B, T>(&self, model: &str, body: &B) -> Result<T, InferenceError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.model_url(model);
        tracing::debug!("Calling inference endpoint: {}", url);

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > ERROR_BODY_SNIPPET {
                let cut = (0..=ERROR_BODY_SNIPPET)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            tracing::error!("Inference endpoint {} returned {}: {}", url, status, body);
            return Err(InferenceError::Http { status, body });
        }

        // The client timeout also covers reading the body
        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| InferenceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Summarizer for HfInference {
    async fn summarize(&self, text: &str) -> Result<String, InferenceError> {
        let request = SummarizationRequest {
            inputs: text,
            parameters: SummarizationParameters::default(),
        };
        let outputs: Vec<SummarizationOutput> =
            self.post_json(&self.config.summary_model, &request).await?;

        let summary = outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .ok_or(InferenceError::EmptyResponse)?;
        tracing::info!("Generated summary ({} chars)", summary.chars().count());
        Ok(summary)
    }
}

#[async_trait]
impl EntityRecognizer for HfInference {
    async fn extract_entities(&self, text: &str) -> Result<Vec<EntitySpan>, InferenceError> {
        let request = TokenClassificationRequest {
            inputs: text,
            parameters: TokenClassificationParameters::default(),
        };
        let entities: Vec<GroupedEntity> =
            self.post_json(&self.config.ner_model, &request).await?;

        tracing::info!("NER returned {} entity spans", entities.len());
        for entity in &entities {
            tracing::trace!(
                "entity {:?} [{}] score={:?} span={:?}..{:?}",
                entity.word,
                entity.entity_group,
                entity.score,
                entity.start,
                entity.end
            );
        }
        Ok(entities.into_iter().map(EntitySpan::from).collect())
    }
}
