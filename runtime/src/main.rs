// Copyright 2026 Jobscope Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use jobscope_runtime::cli;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jobscope",
    about = "Jobscope: job-posting acquisition and job-market analysis",
    version,
    after_help = "Run 'jobscope <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// SQLite database path (overrides JOBSCOPE_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Acquire postings for a keyword and store them
    Crawl {
        /// Search keyword (e.g. "Python")
        keyword: String,
        /// Maximum number of result pages to fetch
        #[arg(long, default_value = "5")]
        pages: u32,
    },
    /// Basic statistics for stored postings
    Stats {
        keyword: String,
    },
    /// Keywords, skills, salary and trends for stored postings
    Analyze {
        keyword: String,
    },
    /// Write the word-cloud term file for stored postings
    Wordcloud {
        keyword: String,
    },
    /// List stored postings, most recent first
    Jobs {
        keyword: String,
        /// Maximum number of postings
        #[arg(long, default_value = "100")]
        limit: usize,
    },
    /// Serve the REST API
    Serve {
        /// Address to bind
        #[arg(long, default_value = cli::serve::DEFAULT_HOST)]
        host: String,
        /// Port (defaults to JOBSCOPE_HTTP_PORT or 8000)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("JOBSCOPE_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("JOBSCOPE_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("JOBSCOPE_VERBOSE", "1");
    }
    if cli.no_color {
        std::env::set_var("JOBSCOPE_NO_COLOR", "1");
    }
    cli::init_tracing();

    let db = cli.db;
    let result = match cli.command {
        Commands::Crawl { keyword, pages } => cli::crawl_cmd::run(&keyword, pages, db).await,
        Commands::Stats { keyword } => cli::stats_cmd::run(&keyword, db).await,
        Commands::Analyze { keyword } => cli::analyze_cmd::run(&keyword, db).await,
        Commands::Wordcloud { keyword } => cli::wordcloud_cmd::run(&keyword, db).await,
        Commands::Jobs { keyword, limit } => cli::jobs_cmd::run(&keyword, limit, db).await,
        Commands::Serve { host, port } => cli::serve::run(&host, port, db).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "jobscope", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        } else if !cli::output::is_quiet() {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}
