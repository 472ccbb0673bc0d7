// Copyright 2026 Jobscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared runtime state used by both the CLI and the REST API.

use crate::config::RuntimeConfig;
use crate::http_client::HttpClient;
use crate::sink::TermFileSink;
use crate::storage::SqliteJobStore;
use anyhow::{Context, Result};
use jobscope::{
    AcquisitionPipeline, Analyzer, CloudOptions, JobStore, Origin, PageFetcher, WordCloudSink,
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Outcome of one crawl: what was stored and where it came from.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub keyword: String,
    pub origin: Origin,
    pub job_ids: Vec<i64>,
}

pub struct SharedState {
    pub started_at: Instant,
    pub config: RuntimeConfig,
    pub store: Arc<dyn JobStore>,
    pub analyzer: Analyzer,
    pub pipeline: AcquisitionPipeline<Arc<dyn PageFetcher>>,
    pub sink: Arc<dyn WordCloudSink>,
    pub cloud_options: CloudOptions,
}

impl SharedState {
    /// Wire the given capabilities together.
    pub fn new(
        config: RuntimeConfig,
        store: Arc<dyn JobStore>,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn WordCloudSink>,
    ) -> Self {
        let pipeline = AcquisitionPipeline::new(fetcher, config.pipeline());
        let analyzer = Analyzer::new(Arc::clone(&store));
        let cloud_options = config.cloud_options();
        Self {
            started_at: Instant::now(),
            config,
            store,
            analyzer,
            pipeline,
            sink,
            cloud_options,
        }
    }

    /// Production wiring: SQLite store, reqwest fetcher, term-file sink.
    pub fn from_config(config: RuntimeConfig) -> Result<Self> {
        let store = SqliteJobStore::open(&config.db_path)
            .with_context(|| format!("cannot open job store at {}", config.db_path.display()))?;
        let referer = format!("{}/", config.base_url.trim_end_matches('/'));
        let fetcher = HttpClient::new(config.http_timeout, &referer);
        let sink = TermFileSink::new(config.output_dir.clone());
        info!("job store at {}", config.db_path.display());
        Ok(Self::new(
            config,
            Arc::new(store),
            Arc::new(fetcher),
            Arc::new(sink),
        ))
    }

    /// Acquire postings for `keyword` and persist them as one batch.
    pub async fn crawl(&self, keyword: &str, max_pages: NonZeroU32) -> Result<CrawlOutcome> {
        let acq = self.pipeline.acquire(keyword, max_pages).await;
        let store = Arc::clone(&self.store);
        let records = acq.records;
        let job_ids = tokio::task::spawn_blocking(move || store.append_batch(&records))
            .await
            .context("store task failed")?
            .context("failed to save postings")?;

        info!(
            "stored {} posting(s) for {keyword:?} ({:?})",
            job_ids.len(),
            acq.origin
        );
        Ok(CrawlOutcome {
            keyword: keyword.to_string(),
            origin: acq.origin,
            job_ids,
        })
    }

    /// Render the word cloud for `keyword` through the configured sink.
    pub fn render_word_cloud(&self, keyword: &str) -> jobscope::Result<String> {
        self.analyzer
            .render_word_cloud(keyword, self.sink.as_ref(), &self.cloud_options)
    }
}
