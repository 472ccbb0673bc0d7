//! CLI subcommand implementations for the Jobscope binary.

pub mod analyze_cmd;
pub mod crawl_cmd;
pub mod jobs_cmd;
pub mod output;
pub mod serve;
pub mod stats_cmd;
pub mod wordcloud_cmd;

use crate::config::RuntimeConfig;
use crate::state::SharedState;
use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber on stderr.
///
/// `RUST_LOG` is honored; `jobscope` targets default to `info`, `debug`
/// with `--verbose` and `warn` with `--quiet`. `JOBSCOPE_LOG_FORMAT=json`
/// switches to JSON lines.
pub fn init_tracing() {
    let level = if output::is_verbose() {
        "jobscope=debug"
    } else if output::is_quiet() {
        "jobscope=warn"
    } else {
        "jobscope=info"
    };
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = level.parse() {
        filter = filter.add_directive(directive);
    }

    let json = std::env::var("JOBSCOPE_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // A subscriber may already be installed (tests); keep it.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Environment config with the `--db` override applied.
pub fn load_config(db: Option<PathBuf>) -> RuntimeConfig {
    let mut config = RuntimeConfig::from_env();
    if let Some(db) = db {
        config.db_path = db;
    }
    config
}

/// Open the production state for a one-shot command.
pub fn open_state(db: Option<PathBuf>) -> Result<SharedState> {
    SharedState::from_config(load_config(db))
}
