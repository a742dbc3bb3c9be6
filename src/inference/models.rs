// src/inference/models.rs
use serde::{Deserialize, Serialize};

/// A contiguous run of text tagged with a semantic category by the NER model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub text: String,
    pub category: String,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// Fixed generation bounds for summaries.
pub const SUMMARY_MAX_LENGTH: u32 = 130;
pub const SUMMARY_MIN_LENGTH: u32 = 30;

/// Body of a summarization request.
/// Example: `{"inputs": "...", "parameters": {"max_length": 130, "min_length": 30, "do_sample": false}}`
#[derive(Debug, Serialize)]
pub struct SummarizationRequest<'a> {
    pub inputs: &'a str,
    pub parameters: SummarizationParameters,
}

#[derive(Debug, Serialize)]
pub struct SummarizationParameters {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
}

impl Default for SummarizationParameters {
    fn default() -> Self {
        Self {
            max_length: SUMMARY_MAX_LENGTH,
            min_length: SUMMARY_MIN_LENGTH,
            do_sample: false, // No sampling, so repeated calls agree
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummarizationOutput {
    pub summary_text: String,
}

/// Body of a token-classification request. `aggregation_strategy: simple`
/// asks the model to merge sub-word tokens into whole entity spans.
#[derive(Debug, Serialize)]
pub struct TokenClassificationRequest<'a> {
    pub inputs: &'a str,
    pub parameters: TokenClassificationParameters,
}

#[derive(Debug, Serialize)]
pub struct TokenClassificationParameters {
    pub aggregation_strategy: &'static str,
}

impl Default for TokenClassificationParameters {
    fn default() -> Self {
        Self {
            aggregation_strategy: "simple",
        }
    }
}

/// One grouped entity as returned by the NER endpoint.
#[derive(Debug, Deserialize)]
pub struct GroupedEntity {
    pub entity_group: String,
    pub word: String,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
}

impl From<GroupedEntity> for EntitySpan {
    fn from(entity: GroupedEntity) -> Self {
        EntitySpan::new(entity.word, entity.entity_group)
    }
}
