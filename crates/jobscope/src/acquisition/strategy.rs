//! The extraction cascade.
//!
//! Every strategy has the same contract: given a parsed document and the
//! page context, return the postings it found or `None`. The cascade stops
//! at the first strategy that returns a non-empty result.

use super::{embedded, markup};
use crate::types::JobPosting;
use scraper::Html;
use serde::Serialize;

/// Per-page inputs shared by every strategy.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub keyword: &'a str,
    pub crawl_time: &'a str,
    /// Cap on job containers read by structural extraction.
    pub max_items: usize,
}

/// One tier of the extraction cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// JSON payloads embedded in `<script>` tags.
    EmbeddedJson,
    /// Job-card containers located by CSS selectors.
    Markup,
}

/// Structured data first, then markup.
pub const DEFAULT_CASCADE: [ExtractionStrategy; 2] =
    [ExtractionStrategy::EmbeddedJson, ExtractionStrategy::Markup];

impl ExtractionStrategy {
    /// Run this strategy against a parsed document.
    pub fn extract(self, document: &Html, ctx: &PageContext<'_>) -> Option<Vec<JobPosting>> {
        let jobs = match self {
            Self::EmbeddedJson => embedded::extract(document, ctx),
            Self::Markup => markup::extract(document, ctx),
        };
        (!jobs.is_empty()).then_some(jobs)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmbeddedJson => "embedded_json",
            Self::Markup => "markup",
        }
    }
}

/// Parse `html` once and run `cascade` over it.
///
/// Returns the winning strategy with its postings, or `None` when every
/// tier came up empty.
pub fn extract_page(
    html: &str,
    ctx: &PageContext<'_>,
    cascade: &[ExtractionStrategy],
) -> Option<(ExtractionStrategy, Vec<JobPosting>)> {
    let document = Html::parse_document(html);
    cascade
        .iter()
        .find_map(|strategy| strategy.extract(&document, ctx).map(|jobs| (*strategy, jobs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PageContext<'static> {
        PageContext {
            keyword: "Go",
            crawl_time: "2026-03-01 12:00:00",
            max_items: 30,
        }
    }

    #[test]
    fn test_structured_data_is_authoritative() {
        let html = r#"
        <html><head><script>
        window.__INITIAL_STATE__ = {"jobList": [{"jobName": "from json"}]};
        </script></head>
        <body><div class="job-primary"><h3>from markup</h3></div></body></html>
        "#;
        let (strategy, jobs) = extract_page(html, &ctx(), &DEFAULT_CASCADE).unwrap();
        assert_eq!(strategy, ExtractionStrategy::EmbeddedJson);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "from json");
    }

    #[test]
    fn test_markup_when_no_payload() {
        let html = r#"<div class="job-card"><h3>Go开发</h3></div>"#;
        let (strategy, jobs) = extract_page(html, &ctx(), &DEFAULT_CASCADE).unwrap();
        assert_eq!(strategy, ExtractionStrategy::Markup);
        assert_eq!(jobs[0].title, "Go开发");
    }

    #[test]
    fn test_extraction_miss() {
        assert!(extract_page("<html><body>blocked</body></html>", &ctx(), &DEFAULT_CASCADE).is_none());
    }

    #[test]
    fn test_custom_cascade_order() {
        let html = r#"
        <script>jobList = [{"jobName": "json"}]</script>
        <div class="job-card"><h3>markup</h3></div>
        "#;
        let (strategy, _) = extract_page(html, &ctx(), &[ExtractionStrategy::Markup]).unwrap();
        assert_eq!(strategy, ExtractionStrategy::Markup);
    }
}
