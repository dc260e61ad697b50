// src/core/net.rs
//
// Page fetching. The pipeline only sees `PageFetcher`; transport, headers and
// cookies are this module's business.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use thiserror::Error;

use crate::config::options::NetOptions;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("Invalid request setup: {0}")]
    Setup(String),
    #[error("No such page: {0}")]
    NotFound(String),
}

/// Retrieve one page of text. One call, one request; no retries.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// The real thing: reqwest over HTTP(S), optional session cookie.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(net: &NetOptions) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &net.cookie {
            let mut v = HeaderValue::from_str(cookie)
                .map_err(|e| FetchError::Setup(format!("cookie: {e}")))?;
            v.set_sensitive(true);
            headers.insert(COOKIE, v);
        }

        let client = reqwest::Client::builder()
            .user_agent(&net.user_agent)
            .timeout(net.timeout)
            .connect_timeout(net.connect_timeout)
            .default_headers(headers)
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(resp.text().await?)
    }
}

/// In-memory pages keyed by exact URL. Records every request in order.
/// Test double for the pipeline.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// Requests for `url` fail with a 503.
    pub fn failing(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut r) = self.requests.lock() {
            r.push(s!(url));
        }
        if self.failing.contains(url) {
            return Err(FetchError::Status(503));
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(s!(url)))
    }
}
