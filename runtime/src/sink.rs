// Copyright 2026 Jobscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Word-cloud sink writing weighted term files.
//!
//! The artifact is `{output_dir}/{keyword}_wordcloud.json`: the display
//! options plus the term list a renderer lays out, most frequent first.

use jobscope::analysis::TermFrequency;
use jobscope::{CloudOptions, Error, TermStream, WordCloudSink};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Serialize)]
struct TermFile<'a> {
    keyword: &'a str,
    options: &'a CloudOptions,
    terms: Vec<TermFrequency>,
}

pub struct TermFileSink {
    output_dir: PathBuf,
}

impl TermFileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the artifact for `keyword`.
    pub fn artifact_path(&self, keyword: &str) -> PathBuf {
        self.output_dir.join(format!("{}_wordcloud.json", file_stem(keyword)))
    }
}

/// Keyword made safe for use as a file name.
fn file_stem(keyword: &str) -> String {
    keyword
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

impl WordCloudSink for TermFileSink {
    fn render(
        &self,
        keyword: &str,
        terms: &TermStream,
        options: &CloudOptions,
    ) -> jobscope::Result<String> {
        if terms.is_empty() {
            return Err(Error::EmptyTermStream);
        }
        std::fs::create_dir_all(&self.output_dir)?;

        let file = TermFile {
            keyword,
            options,
            terms: terms.frequencies(options.max_words),
        };
        let path = self.artifact_path(keyword);
        std::fs::write(&path, serde_json::to_vec_pretty(&file)?)?;

        info!(
            "wrote word cloud terms for {keyword:?} ({} term(s)) to {}",
            file.terms.len(),
            path.display()
        );
        Ok(path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_term_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = TermFileSink::new(dir.path().join("clouds"));
        let options = CloudOptions {
            max_words: 2,
            ..CloudOptions::default()
        };
        let path = sink
            .render("Rust", &TermStream::new("后端 Rust 后端 Tokio Rust 后端"), &options)
            .unwrap();
        assert!(path.ends_with("Rust_wordcloud.json"));

        let v: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(v["keyword"], "Rust");
        assert_eq!(v["options"]["width"], 800);
        assert_eq!(v["options"]["colormap"], "viridis");
        assert_eq!(v["terms"].as_array().unwrap().len(), 2);
        assert_eq!(v["terms"][0]["term"], "后端");
        assert_eq!(v["terms"][0]["count"], 3);
    }

    #[test]
    fn test_empty_stream_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let sink = TermFileSink::new(dir.path());
        let err = sink
            .render("Go", &TermStream::default(), &CloudOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyTermStream));
        assert!(!sink.artifact_path("Go").exists());
    }

    #[test]
    fn test_keyword_is_sanitized_for_file_name() {
        let sink = TermFileSink::new("/tmp/out");
        assert_eq!(
            sink.artifact_path("C/C++"),
            PathBuf::from("/tmp/out/C_C++_wordcloud.json")
        );
    }
}
