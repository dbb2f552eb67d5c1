use crate::config::Config;
use crate::models::{ITunesItem, ITunesSearchResponse};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItunesError {
    #[error("request to iTunes failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("iTunes responded with status {0}")]
    Status(StatusCode),

    #[error("could not decode iTunes response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct ITunesClient {
    client: Client,
    base_url: String,
    limit: u32,
    timeout: Duration,
}

impl ITunesClient {
    pub fn new(base_url: impl Into<String>, limit: u32, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            limit,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.upstream_base_url.clone(),
            config.upstream_limit,
            config.upstream_timeout(),
        )
    }

    pub fn search_url(&self, term: &str) -> String {
        format!(
            "{}/search?term={}&media=music&entity=song&limit={}",
            self.base_url,
            urlencoding::encode(term),
            self.limit
        )
    }

    /// Runs a single catalog search. Any transport failure, non-2xx status or
    /// undecodable body is an error; nothing is retried.
    pub async fn search_songs(&self, term: &str) -> Result<Vec<ITunesItem>, ItunesError> {
        let response = self
            .client
            .get(self.search_url(term))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ItunesError::Status(status));
        }

        let body = response.text().await?;
        let parsed: ITunesSearchResponse = serde_json::from_str(&body)?;

        Ok(parsed.results)
    }
}
