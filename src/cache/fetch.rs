//! Archive fetching.
//!
//! The cache talks to the release line through the [`ArtifactFetcher`]
//! trait so tests can count fetches without a network; [`HttpFetcher`] is
//! the production implementation.

use reqwest::blocking::Client;
use std::time::Duration;

use crate::error::{Result, SkiffError};

/// Retrieves a runtime archive by URL.
pub trait ArtifactFetcher: Send + Sync {
    /// Fetch the archive bytes at `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetches runtime archives over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with default 30-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP fetcher with custom timeout.
    ///
    /// The timeout covers the whole download; on expiry the fetch fails
    /// with a typed error instead of hanging the build pass.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("skiff")
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            timeout,
        }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().map_err(|e| SkiffError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(SkiffError::Fetch {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response.bytes().map_err(|e| SkiffError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(bytes.to_vec())
    }
}
