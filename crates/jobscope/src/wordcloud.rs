//! Word-cloud rendering capability.

use crate::analysis::{Analyzer, TermStream};
use crate::types::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Font files probed for CJK glyph coverage, in order.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/simhei/SimHei.ttf",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "C:/Windows/Fonts/simhei.ttf",
    "simhei.ttf",
];

/// Display options handed to a [`WordCloudSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudOptions {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
    pub max_words: usize,
    pub relative_scaling: f64,
    pub colormap: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background_color: "white".to_string(),
            max_words: crate::analysis::text::DEFAULT_MAX_WORDS,
            relative_scaling: 0.5,
            colormap: "viridis".to_string(),
            font_path: None,
        }
    }
}

impl CloudOptions {
    pub fn with_font_path(mut self, font_path: Option<PathBuf>) -> Self {
        self.font_path = font_path;
        self
    }
}

/// First candidate that exists on disk.
pub fn discover_font(candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .map(Path::to_path_buf)
}

/// Turns a term stream into a rendered artifact.
pub trait WordCloudSink: Send + Sync {
    /// Render `terms` for `keyword`, returning a reference to the artifact
    /// (a path or URL). Fails with [`Error::EmptyTermStream`] on no input.
    fn render(&self, keyword: &str, terms: &TermStream, options: &CloudOptions) -> Result<String>;
}

impl Analyzer {
    /// Compute the term feed for `keyword` and render it through `sink`.
    pub fn render_word_cloud(
        &self,
        keyword: &str,
        sink: &dyn WordCloudSink,
        options: &CloudOptions,
    ) -> Result<String> {
        let terms = self.word_cloud_terms(keyword)?;
        if terms.is_empty() {
            return Err(Error::EmptyTermStream);
        }
        sink.render(keyword, &terms, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JobStore, MemoryStore};
    use crate::types::JobPosting;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingSink {
        rendered: Mutex<Vec<(String, usize)>>,
    }

    impl WordCloudSink for RecordingSink {
        fn render(&self, keyword: &str, terms: &TermStream, options: &CloudOptions) -> Result<String> {
            let n = terms.frequencies(options.max_words).len();
            self.rendered.lock().unwrap().push((keyword.to_string(), n));
            Ok(format!("memory://{keyword}"))
        }
    }

    #[test]
    fn test_default_options() {
        let opts = CloudOptions::default();
        assert_eq!((opts.width, opts.height), (800, 400));
        assert_eq!(opts.max_words, 200);
        assert_eq!(opts.colormap, "viridis");
        assert!(opts.font_path.is_none());
    }

    #[test]
    fn test_discover_font_picks_first_existing() {
        let dir = std::env::temp_dir();
        let existing = dir.to_string_lossy().to_string();
        let found = discover_font(&["/definitely/not/here.ttf", &existing]);
        assert_eq!(found, Some(dir));
        assert_eq!(discover_font(&["/definitely/not/here.ttf"]), None);
    }

    #[test]
    fn test_render_requires_terms() {
        let store: Arc<dyn JobStore> = Arc::new(MemoryStore::new());
        let analyzer = Analyzer::new(Arc::clone(&store));
        let sink = RecordingSink::default();

        let err = analyzer
            .render_word_cloud("Rust", &sink, &CloudOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyTermStream));

        let mut job = JobPosting::placeholder("Rust", "2026-03-01 12:00:00");
        job.description = "负责后端开发 熟悉 Docker".to_string();
        store.append(&job).unwrap();
        let artifact = analyzer
            .render_word_cloud("Rust", &sink, &CloudOptions::default())
            .unwrap();
        assert_eq!(artifact, "memory://Rust");
        assert_eq!(sink.rendered.lock().unwrap().len(), 1);
    }
}
