//! Corpus analysis over postings read from a [`JobStore`].
//!
//! Every entry point reads the keyword's corpus once and computes from it.
//! An empty corpus produces the "no data" report shape; only store failures
//! are errors.

pub mod distribution;
pub mod report;
pub mod salary;
pub mod text;

pub use report::{AnalysisReport, NoData, Report, StatsReport, Trends};
pub use salary::{parse_salary, SalaryStatistics};
pub use text::{Segmenter, TermFrequency, TermStream};

use crate::store::JobStore;
use crate::types::{JobPosting, Result};
use std::sync::Arc;
use tracing::debug;

/// Round `value` to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Analysis engine bound to a store.
pub struct Analyzer {
    store: Arc<dyn JobStore>,
    segmenter: Segmenter,
}

impl Analyzer {
    /// Create an analyzer. Loads the segmentation dictionary.
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self::with_segmenter(store, Segmenter::new())
    }

    pub fn with_segmenter(store: Arc<dyn JobStore>, segmenter: Segmenter) -> Self {
        Self { store, segmenter }
    }

    pub fn store(&self) -> &Arc<dyn JobStore> {
        &self.store
    }

    fn corpus(&self, keyword: &str) -> Result<Vec<JobPosting>> {
        let jobs: Vec<JobPosting> = self
            .store
            .all(Some(keyword))?
            .into_iter()
            .map(|row| row.job)
            .collect();
        debug!("corpus for {keyword:?}: {} posting(s)", jobs.len());
        Ok(jobs)
    }

    /// Basic statistics for `keyword`.
    pub fn statistics(&self, keyword: &str) -> Result<Report<StatsReport>> {
        Ok(StatsReport::from_jobs(&self.corpus(keyword)?))
    }

    /// Keywords, skills, salary and trends for `keyword`.
    pub fn detailed_analysis(&self, keyword: &str) -> Result<Report<AnalysisReport>> {
        let jobs = self.corpus(keyword)?;
        Ok(AnalysisReport::from_jobs(keyword, &jobs, &self.segmenter))
    }

    /// Word-cloud term feed for `keyword`. Empty when there is no data.
    pub fn word_cloud_terms(&self, keyword: &str) -> Result<TermStream> {
        let jobs = self.corpus(keyword)?;
        if jobs.is_empty() {
            return Ok(TermStream::default());
        }
        Ok(self.segmenter.cloud_terms(&text::cloud_text(&jobs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333_333, 2), 33.33);
        assert_eq!(round_to(0.123_456, 4), 0.1235);
        assert_eq!(round_to(30.0, 2), 30.0);
    }
}
