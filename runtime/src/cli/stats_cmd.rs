//! `jobscope stats <keyword>`: basic statistics over stored postings.

use crate::cli::output::{self, Styled};
use anyhow::Result;
use jobscope::analysis::SalaryStatistics;
use jobscope::{Report, NO_DATA_MESSAGE};
use std::path::PathBuf;

/// Run the stats command.
pub async fn run(keyword: &str, db: Option<PathBuf>) -> Result<()> {
    let state = crate::cli::open_state(db)?;
    let report = state.analyzer.statistics(keyword)?;

    if output::is_json() {
        output::print_json(&report);
        return Ok(());
    }

    let stats = match report {
        Report::Data(stats) => stats,
        Report::NoData(_) => {
            println!("  {NO_DATA_MESSAGE} ({keyword})");
            return Ok(());
        }
    };

    let s = Styled::new();
    println!(
        "  {}: {} posting(s), {} companies\n",
        s.bold(keyword),
        stats.total_jobs,
        stats.company_count
    );
    print_salary(&stats.salary_statistics);

    println!("\n  Areas:");
    for a in &stats.area_distribution {
        println!("    {:<16} {}", a.area, a.count);
    }
    println!("\n  Experience:");
    for e in &stats.experience_distribution {
        println!("    {:<16} {}", e.experience, e.count);
    }
    println!("\n  Education:");
    for e in &stats.education_distribution {
        println!("    {:<16} {}", e.education, e.count);
    }
    Ok(())
}

/// Salary summary block shared with `analyze`.
pub fn print_salary(salary: &SalaryStatistics) {
    if salary.distribution.is_empty() {
        println!("  Salary: no parsable salaries");
        return;
    }
    println!(
        "  Salary (K): avg {:.2}  median {}  min {}  max {}",
        salary.avg, salary.median, salary.min, salary.max
    );
    for bucket in &salary.distribution {
        println!(
            "    {:<8} {:>5}  {:>6.2}%",
            bucket.range, bucket.count, bucket.percentage
        );
    }
}
