// src/utils/error.rs
use thiserror::Error;

// Page download failures. These never reach the pipeline caller: they are
// logged and turned into "no content".
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Includes timeouts and connection errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // Any non-2xx status

    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),
}

// Model collaborator failures. These propagate to the service boundary.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Inference request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Inference endpoint returned {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse inference response: {0}")]
    Parse(String),

    #[error("Inference response contained no output")]
    EmptyResponse,

    #[error("Inference call timed out after {0} seconds")]
    Timeout(u64),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Page fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Model inference failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}
