// Copyright 2026 Jobscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration from `JOBSCOPE_*` environment variables.
//!
//! Every value has a typed fallback; unparsable values fall back silently.
//! CLI flags override what is read here.

use jobscope::{discover_font, CloudOptions, PipelineConfig, FONT_CANDIDATES};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.zhipin.com";
pub const DEFAULT_CITY: &str = "100010000";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_DELAY_MIN_MS: u64 = 2_000;
pub const DEFAULT_DELAY_MAX_MS: u64 = 5_000;
pub const DEFAULT_OUTPUT_DIR: &str = "static/wordclouds";
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Default pages per crawl when the caller does not say.
pub const DEFAULT_MAX_PAGES: u32 = 5;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub db_path: PathBuf,
    pub base_url: String,
    pub city: String,
    pub http_timeout: Duration,
    pub delay_min: Duration,
    pub delay_max: Duration,
    pub output_dir: PathBuf,
    pub font_path: Option<PathBuf>,
    pub http_port: u16,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            base_url: DEFAULT_BASE_URL.to_string(),
            city: DEFAULT_CITY.to_string(),
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
            delay_min: Duration::from_millis(DEFAULT_DELAY_MIN_MS),
            delay_max: Duration::from_millis(DEFAULT_DELAY_MAX_MS),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            font_path: None,
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        let delay_min = read_env_u64("JOBSCOPE_DELAY_MIN_MS", DEFAULT_DELAY_MIN_MS);
        let delay_max = read_env_u64("JOBSCOPE_DELAY_MAX_MS", DEFAULT_DELAY_MAX_MS).max(delay_min);
        Self {
            db_path: read_env_string("JOBSCOPE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            base_url: read_env_string("JOBSCOPE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            city: read_env_string("JOBSCOPE_CITY").unwrap_or_else(|| DEFAULT_CITY.to_string()),
            http_timeout: Duration::from_millis(
                read_env_u64("JOBSCOPE_HTTP_TIMEOUT_MS", DEFAULT_HTTP_TIMEOUT_MS).max(1),
            ),
            delay_min: Duration::from_millis(delay_min),
            delay_max: Duration::from_millis(delay_max),
            output_dir: read_env_string("JOBSCOPE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            font_path: read_env_string("JOBSCOPE_FONT_PATH")
                .map(PathBuf::from)
                .or_else(|| discover_font(FONT_CANDIDATES)),
            http_port: read_env_u16("JOBSCOPE_HTTP_PORT", DEFAULT_HTTP_PORT),
        }
    }

    /// Acquisition settings derived from this config.
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            base_url: self.base_url.clone(),
            city: self.city.clone(),
            timeout: self.http_timeout,
            min_delay: self.delay_min,
            max_delay: self.delay_max,
            ..PipelineConfig::default()
        }
    }

    /// Word-cloud display options with the resolved font.
    pub fn cloud_options(&self) -> CloudOptions {
        CloudOptions::default().with_font_path(self.font_path.clone())
    }
}

/// `~/.jobscope/jobs.db`, or `/tmp/.jobscope/jobs.db` without a home dir.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".jobscope")
        .join("jobs.db")
}

fn read_env_u64(name: &str, default_value: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default_value)
}

fn read_env_u16(name: &str, default_value: u16) -> u16 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or(default_value)
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_defaults() {
        let cfg = RuntimeConfig::default();
        let pipeline = cfg.pipeline();
        let core = PipelineConfig::default();
        assert_eq!(pipeline.base_url, core.base_url);
        assert_eq!(pipeline.city, core.city);
        assert_eq!(pipeline.timeout, core.timeout);
        assert_eq!(pipeline.min_delay, core.min_delay);
        assert_eq!(pipeline.max_delay, core.max_delay);
        assert!(cfg.db_path.ends_with(".jobscope/jobs.db"));
    }

    #[test]
    fn test_env_overrides() {
        // The only test in this crate that mutates the process environment.
        std::env::set_var("JOBSCOPE_CITY", " 101020100 ");
        std::env::set_var("JOBSCOPE_HTTP_PORT", "not-a-port");
        std::env::set_var("JOBSCOPE_DELAY_MIN_MS", "3000");
        std::env::set_var("JOBSCOPE_DELAY_MAX_MS", "1000");
        std::env::set_var("JOBSCOPE_FONT_PATH", "/fonts/custom.ttf");

        let cfg = RuntimeConfig::from_env();
        assert_eq!(cfg.city, "101020100");
        assert_eq!(cfg.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(cfg.delay_min, Duration::from_millis(3000));
        assert_eq!(cfg.delay_max, Duration::from_millis(3000));
        assert_eq!(
            cfg.cloud_options().font_path,
            Some(PathBuf::from("/fonts/custom.ttf"))
        );

        for name in [
            "JOBSCOPE_CITY",
            "JOBSCOPE_HTTP_PORT",
            "JOBSCOPE_DELAY_MIN_MS",
            "JOBSCOPE_DELAY_MAX_MS",
            "JOBSCOPE_FONT_PATH",
        ] {
            std::env::remove_var(name);
        }
    }
}
