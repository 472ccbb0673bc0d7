//! `jobscope jobs <keyword>`: list stored postings, most recent first.

use crate::cli::output;
use anyhow::Result;
use std::path::PathBuf;

/// Run the jobs command.
pub async fn run(keyword: &str, limit: usize, db: Option<PathBuf>) -> Result<()> {
    let state = crate::cli::open_state(db)?;
    let jobs = state.store.query_by_keyword(keyword, Some(limit))?;

    if output::is_json() {
        output::print_json(&serde_json::json!({ "jobs": jobs, "count": jobs.len() }));
        return Ok(());
    }
    if jobs.is_empty() {
        println!("  No postings stored for '{keyword}'. Run: jobscope crawl {keyword}");
        return Ok(());
    }

    for row in &jobs {
        let j = &row.job;
        println!(
            "  #{:<6} {}  |  {}  |  {}  |  {}",
            row.id, j.title, j.company, j.salary, j.area
        );
    }
    if !output::is_quiet() {
        println!("\n  {} posting(s)", jobs.len());
    }
    Ok(())
}
