//! Page-by-page acquisition with stop-on-first-failure and synthetic fallback.

use super::strategy::{extract_page, ExtractionStrategy, PageContext, DEFAULT_CASCADE};
use super::{synthetic, Acquisition, AcquisitionError, Origin, PageFetcher, PipelineConfig};
use crate::types::{crawl_timestamp, JobPosting};
use rand::Rng;
use std::future::Future;
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

/// Acquisition pipeline over an injected fetcher.
///
/// Pages are fetched strictly in order. A fetch failure ends the run; a
/// page with no extractable records ends the run as well. If nothing real
/// was obtained, the run is answered with synthetic records instead, so the
/// result is never empty.
pub struct AcquisitionPipeline<F> {
    fetcher: F,
    config: PipelineConfig,
    cascade: Vec<ExtractionStrategy>,
}

impl<F: PageFetcher> AcquisitionPipeline<F> {
    /// Create a pipeline with the default extraction cascade.
    pub fn new(fetcher: F, config: PipelineConfig) -> Self {
        Self {
            fetcher,
            config,
            cascade: DEFAULT_CASCADE.to_vec(),
        }
    }

    /// Replace the extraction cascade.
    pub fn with_cascade(mut self, cascade: Vec<ExtractionStrategy>) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Search URL for one result page.
    pub fn search_url(&self, keyword: &str, page: u32) -> Result<String, url::ParseError> {
        let mut url = url::Url::parse(&self.config.base_url)?.join("/web/geek/job")?;
        url.query_pairs_mut()
            .append_pair("query", keyword)
            .append_pair("city", &self.config.city)
            .append_pair("page", &page.to_string());
        Ok(url.into())
    }

    /// Acquire postings for `keyword` over up to `max_pages` pages.
    pub async fn run(&self, keyword: &str, max_pages: NonZeroU32) -> Vec<JobPosting> {
        self.acquire(keyword, max_pages).await.records
    }

    /// Like [`run`](Self::run), also reporting where the records came from.
    pub async fn acquire(&self, keyword: &str, max_pages: NonZeroU32) -> Acquisition {
        match self.acquire_inner(keyword, max_pages, None).await {
            Ok(acq) => acq,
            Err(e) => {
                warn!("acquisition for {keyword:?} aborted: {e}");
                synthetic_acquisition(keyword, max_pages, &crawl_timestamp(), 0)
            }
        }
    }

    /// Acquire until finished or until `shutdown` is notified.
    ///
    /// Signal with [`Notify::notify_one`] so a notification sent between
    /// awaits is not lost. On cancellation every record gathered so far is
    /// discarded.
    pub async fn acquire_until(
        &self,
        keyword: &str,
        max_pages: NonZeroU32,
        shutdown: &Notify,
    ) -> Result<Acquisition, AcquisitionError> {
        self.acquire_inner(keyword, max_pages, Some(shutdown)).await
    }

    async fn acquire_inner(
        &self,
        keyword: &str,
        max_pages: NonZeroU32,
        shutdown: Option<&Notify>,
    ) -> Result<Acquisition, AcquisitionError> {
        let crawl_time = crawl_timestamp();
        let last_page = max_pages.get();
        let mut records: Vec<JobPosting> = Vec::new();
        let mut pages_fetched = 0u32;

        info!("acquiring {keyword:?} (max_pages={last_page})");

        for page in 1..=last_page {
            let url = match self.search_url(keyword, page) {
                Ok(u) => u,
                Err(e) => {
                    warn!("cannot build search url from {:?}: {e}", self.config.base_url);
                    break;
                }
            };

            let fetched = cancellable(self.fetcher.fetch(&url, self.config.timeout), shutdown).await?;
            let body = match fetched {
                Ok(resp) if resp.is_success() => resp.body,
                Ok(resp) => {
                    warn!("page {page} returned status {}", resp.status);
                    break;
                }
                Err(e) => {
                    warn!("fetching page {page} failed: {e}");
                    break;
                }
            };
            pages_fetched += 1;

            let ctx = PageContext {
                keyword,
                crawl_time: &crawl_time,
                max_items: self.config.max_items_per_page,
            };
            match extract_page(&body, &ctx, &self.cascade) {
                Some((strategy, jobs)) => {
                    debug!(
                        "page {page}: {} record(s) via {}",
                        jobs.len(),
                        strategy.as_str()
                    );
                    records.extend(jobs);
                }
                None if page == 1 => {
                    warn!("page 1 yielded no records; source unusable for this run");
                    break;
                }
                None => {
                    info!("page {page} yielded no records; stopping");
                    break;
                }
            }

            if page < last_page {
                let delay = self.politeness_delay();
                debug!("waiting {}ms before page {}", delay.as_millis(), page + 1);
                cancellable(tokio::time::sleep(delay), shutdown).await?;
            }
        }

        if records.is_empty() {
            let acq = synthetic_acquisition(keyword, max_pages, &crawl_time, pages_fetched);
            warn!(
                "no live records for {keyword:?}; generated {} synthetic record(s)",
                acq.records.len()
            );
            return Ok(acq);
        }

        info!(
            "acquired {} live record(s) for {keyword:?} from {pages_fetched} page(s)",
            records.len()
        );
        Ok(Acquisition {
            records,
            origin: Origin::Live,
            pages_fetched,
        })
    }

    /// Uniformly random delay within the configured bounds.
    fn politeness_delay(&self) -> Duration {
        let lo = self.config.min_delay.as_millis() as u64;
        let hi = self.config.max_delay.as_millis() as u64;
        if hi <= lo {
            return Duration::from_millis(lo);
        }
        Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
    }
}

fn synthetic_acquisition(
    keyword: &str,
    max_pages: NonZeroU32,
    crawl_time: &str,
    pages_fetched: u32,
) -> Acquisition {
    Acquisition {
        records: synthetic::generate(keyword, max_pages, crawl_time),
        origin: Origin::Synthetic,
        pages_fetched,
    }
}

async fn cancellable<T>(
    fut: impl Future<Output = T>,
    shutdown: Option<&Notify>,
) -> Result<T, AcquisitionError> {
    match shutdown {
        None => Ok(fut.await),
        Some(signal) => tokio::select! {
            _ = signal.notified() => Err(AcquisitionError::Cancelled),
            v = fut => Ok(v),
        },
    }
}
