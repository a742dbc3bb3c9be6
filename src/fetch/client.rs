// src/fetch/client.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;

use crate::utils::error::FetchError;

// Many news sites reject clients that don't look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
const MAX_REDIRECTS: usize = 10;

/// A downloaded page. Only successful (2xx) responses become one.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub html: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Fetches pages over HTTP with a browser User-Agent and a hard timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }
}

/// Parses and normalizes a user supplied URL. Only http(s) is accepted.
pub fn normalize_url(input: &str) -> Result<String, FetchError> {
    let parsed = url::Url::parse(input.trim())
        .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", input, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        other => Err(FetchError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            input, other
        ))),
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let url = normalize_url(url)?;
        tracing::info!("Fetching page: {}", url);
        tracing::debug!("Using User-Agent: {}", BROWSER_USER_AGENT);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8")
            .send()
            .await?; // Timeouts surface here as FetchError::Network

        let status = response.status();
        tracing::debug!("Fetched {} - Status: {}", url, status);
        if !status.is_success() {
            tracing::warn!("HTTP error status: {} for URL: {}", status, url);
            return Err(FetchError::Http(status));
        }

        let html = response.text().await?;
        tracing::debug!("Downloaded {} bytes from {}", html.len(), url);

        Ok(FetchedPage {
            url,
            status: status.as_u16(),
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_url_accepts_http_and_https() {
        assert_eq!(
            normalize_url(" https://example.com/news/story ").unwrap(),
            "https://example.com/news/story"
        );
        assert!(normalize_url("http://example.com").is_ok());
    }

    #[test]
    fn normalize_url_rejects_garbage_and_other_schemes() {
        assert!(matches!(normalize_url("not a url"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(
            normalize_url("ftp://example.com/file"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn http_fetcher_builds_with_timeout() {
        assert!(HttpFetcher::new(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)).is_ok());
    }
}
