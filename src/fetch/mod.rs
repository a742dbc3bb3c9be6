// src/fetch/mod.rs
pub mod client;

// Re-export key types for convenience
#[allow(unused_imports)]
pub use client::{FetchedPage, HttpFetcher, PageFetcher};
