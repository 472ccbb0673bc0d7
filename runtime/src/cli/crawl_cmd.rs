//! `jobscope crawl <keyword>`: acquire postings and store them.

use crate::cli::output::{self, Styled};
use anyhow::{Context, Result};
use jobscope::Origin;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Run the crawl command.
pub async fn run(keyword: &str, pages: u32, db: Option<PathBuf>) -> Result<()> {
    let max_pages = NonZeroU32::new(pages).context("--pages must be at least 1")?;
    let state = crate::cli::open_state(db)?;
    let outcome = state.crawl(keyword, max_pages).await?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "success": !outcome.job_ids.is_empty(),
            "keyword": outcome.keyword,
            "origin": outcome.origin,
            "total_count": outcome.job_ids.len(),
            "job_ids": outcome.job_ids,
        }));
        return Ok(());
    }

    if !output::is_quiet() {
        let s = Styled::new();
        println!(
            "  {} Stored {} posting(s) for '{keyword}'",
            s.ok_sym(),
            outcome.job_ids.len()
        );
        if outcome.origin == Origin::Synthetic {
            println!(
                "  {} Source was unusable; postings are synthetic placeholders.",
                s.warn_sym()
            );
        }
    }
    Ok(())
}
