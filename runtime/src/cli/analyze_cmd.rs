//! `jobscope analyze <keyword>`: keywords, skills, salary and trends.

use crate::cli::output::{self, Styled};
use crate::cli::stats_cmd::print_salary;
use anyhow::Result;
use jobscope::{Report, NO_DATA_MESSAGE};
use std::path::PathBuf;

/// Run the analyze command.
pub async fn run(keyword: &str, db: Option<PathBuf>) -> Result<()> {
    let state = crate::cli::open_state(db)?;
    let report = state.analyzer.detailed_analysis(keyword)?;

    if output::is_json() {
        output::print_json(&report);
        return Ok(());
    }

    let analysis = match report {
        Report::Data(a) => a,
        Report::NoData(_) => {
            println!("  {NO_DATA_MESSAGE} ({keyword})");
            return Ok(());
        }
    };

    let s = Styled::new();
    println!(
        "  {}: {} posting(s), latest crawl {}\n",
        s.bold(&analysis.keyword),
        analysis.total_jobs,
        analysis.analysis_time
    );

    println!("  Top keywords:");
    for kw in &analysis.top_keywords {
        println!("    {:<16} {:.4}", kw.word, kw.weight);
    }

    println!("\n  Required skills:");
    for skill in &analysis.required_skills {
        println!(
            "    {:<16} {:>5}  {:.2}",
            skill.skill, skill.count, skill.demand_rate
        );
    }

    println!();
    print_salary(&analysis.salary_range_analysis);

    println!("\n  Postings by crawl date:");
    for d in &analysis.trends.job_count_by_date {
        println!("    {}  {}", d.date, d.count);
    }
    Ok(())
}
