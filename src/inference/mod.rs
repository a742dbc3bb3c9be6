// src/inference/mod.rs
pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::utils::error::InferenceError;

// Re-export key types for convenience
#[allow(unused_imports)]
pub use client::{HfInference, InferenceConfig};
pub use models::EntitySpan;

/// Bounded text in, summary out. Implementations must be safe to share
/// across concurrent requests.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, InferenceError>;
}

/// Named-entity recognition returning already grouped spans.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn extract_entities(&self, text: &str) -> Result<Vec<EntitySpan>, InferenceError>;
}
