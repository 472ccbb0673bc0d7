// Copyright 2026 Jobscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Async HTTP client wrapping reqwest.
//!
//! Sends browser-like headers and follows redirects. Each request is made
//! exactly once: failures go back to the acquisition pipeline, which decides
//! what a failed page means for the run.

use async_trait::async_trait;
use jobscope::{FetchError, FetchedPage, PageFetcher};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/120.0.0.0 Safari/537.36";

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

const ACCEPT_LANGUAGE_ZH: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// HTTP client for the acquisition pipeline.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client with a default timeout, sending `referer` on every
    /// request.
    pub fn new(timeout: Duration, referer: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .default_headers(browser_headers(referer))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Perform a single GET request.
    ///
    /// Non-2xx responses are reported as [`FetchError::Status`].
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            debug!("GET {url} -> {status}");
            return Err(FetchError::Status(status));
        }

        let body = resp.text().await.map_err(transport_error)?;
        debug!("GET {url} -> {status} ({} bytes)", body.len());
        Ok(FetchedPage { status, body })
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        self.get(url, timeout).await
    }
}

fn browser_headers(referer: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_ZH));
    match HeaderValue::from_str(referer) {
        Ok(v) => {
            headers.insert(REFERER, v);
        }
        Err(e) => warn!("ignoring invalid referer {referer:?}: {e}"),
    }
    headers
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(e.to_string())
    }
}
