//! Layered job-posting acquisition.
//!
//! A search page is fetched through an injected [`PageFetcher`] and run
//! through an extraction cascade: embedded JSON payloads first, then
//! structural HTML selectors. When the source yields nothing usable for the
//! first page, the whole run switches to deterministic synthetic records so
//! callers always receive a non-empty result.

pub mod embedded;
pub mod markup;
pub mod pipeline;
pub mod strategy;
pub mod synthetic;

pub use pipeline::AcquisitionPipeline;
pub use strategy::{extract_page, ExtractionStrategy, DEFAULT_CASCADE};

use crate::types::{FetchError, JobPosting};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Maximum job containers considered per page by structural extraction.
pub const MAX_ITEMS_PER_PAGE: usize = 30;

/// Records synthesized per requested page on the fallback path.
pub const SYNTHETIC_PER_PAGE: usize = 10;

/// A fetched document.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl FetchedPage {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Page-fetch capability consumed by the pipeline.
///
/// Implementations report transport failures as errors. A non-success
/// status may be returned either as `Ok` with that status or as
/// [`FetchError::Status`]; the pipeline treats both as a failed fetch.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`, giving up after `timeout`.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url, timeout).await
    }
}

/// Pipeline tuning knobs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Site root, e.g. `https://www.zhipin.com`.
    pub base_url: String,
    /// City code appended to the search query.
    pub city: String,
    /// Per-request timeout handed to the fetcher.
    pub timeout: Duration,
    /// Lower bound of the randomized inter-page delay.
    pub min_delay: Duration,
    /// Upper bound of the randomized inter-page delay.
    pub max_delay: Duration,
    /// Cap on job containers read per page.
    pub max_items_per_page: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.zhipin.com".to_string(),
            city: "100010000".to_string(),
            timeout: Duration::from_secs(10),
            min_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(5),
            max_items_per_page: MAX_ITEMS_PER_PAGE,
        }
    }
}

impl PipelineConfig {
    /// Config with no politeness delay, for tests and local fixtures.
    pub fn without_delay(mut self) -> Self {
        self.min_delay = Duration::ZERO;
        self.max_delay = Duration::ZERO;
        self
    }
}

/// Where the records of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Extracted from fetched pages.
    Live,
    /// Produced by the synthetic fallback.
    Synthetic,
}

/// Result of one acquisition run.
#[derive(Debug, Clone)]
pub struct Acquisition {
    pub records: Vec<JobPosting>,
    pub origin: Origin,
    /// Pages fetched successfully (regardless of extraction outcome).
    pub pages_fetched: u32,
}

/// Signals raised inside the acquisition layer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionError {
    #[error("acquisition cancelled")]
    Cancelled,
}
