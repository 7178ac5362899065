// src/feed/client.rs

//! HTTP client for feed downloads
//!
//! Wraps reqwest's blocking client with a request timeout and bounded retry.
//! Downloads are buffered in memory: the NVD recent/modified feeds are a few
//! megabytes decompressed.

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::compression;
use crate::error::{Error, Result};
use crate::hash;

use super::{FeedPayload, FeedSource, FeedVariant};

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum retry attempts for failed downloads
const MAX_RETRIES: u32 = 3;

/// Retry delay in milliseconds
const RETRY_DELAY_MS: u64 = 1000;

/// Feed source backed by HTTP GET against the NVD endpoints
pub struct HttpFeedSource {
    client: Client,
    max_retries: u32,
}

impl HttpFeedSource {
    /// Create a client with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(HTTP_TIMEOUT)
    }

    /// Create a client with a caller-supplied timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Init(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Download a URL to bytes with retry support
    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.get(url).send() {
                Ok(response) => {
                    if !response.status().is_success() {
                        return Err(Error::Fetch(format!(
                            "HTTP {} from {}",
                            response.status(),
                            url
                        )));
                    }

                    let bytes = response
                        .bytes()
                        .map_err(|e| Error::Fetch(format!("failed to read response: {e}")))?;

                    return Ok(bytes.to_vec());
                }
                Err(e) => {
                    if attempt >= self.max_retries {
                        return Err(Error::Fetch(format!(
                            "failed to fetch {url} after {attempt} attempts: {e}"
                        )));
                    }
                    warn!("Fetch attempt {} for {} failed: {}, retrying...", attempt, url, e);
                    std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64));
                }
            }
        }
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch(&self, feed: FeedVariant) -> Result<FeedPayload> {
        debug!("Fetching feed '{}' from {}", feed, feed.url());

        let raw = self.download(feed.url())?;
        let bytes = compression::gunzip(&raw)?;
        let hash = hash::snapshot_hash(&bytes);

        debug!(
            "Feed '{}': {} bytes compressed, {} bytes decompressed, snapshot {}",
            feed,
            raw.len(),
            bytes.len(),
            &hash[..12]
        );

        Ok(FeedPayload { bytes, hash })
    }
}
