//! Salary normalization and summary statistics.
//!
//! Raw salary text such as `15K-25K` or `8万-12万` is reduced to one value in
//! thousand-units (the midpoint of a range). Values that cannot be
//! normalized are excluded from the aggregates, never reported as errors.

use super::round_to;
use crate::types::SALARY_NEGOTIABLE;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DIGIT_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Histogram buckets in thousand-units, half-open `[lo, hi)`.
pub const SALARY_BUCKETS: &[(f64, f64, &str)] = &[
    (0.0, 10.0, "0-10K"),
    (10.0, 15.0, "10-15K"),
    (15.0, 20.0, "15-20K"),
    (20.0, 25.0, "20-25K"),
    (25.0, 30.0, "25-30K"),
    (30.0, 40.0, "30-40K"),
    (40.0, 50.0, "40-50K"),
    (50.0, f64::INFINITY, "50K+"),
];

/// Normalize a raw salary string into thousand-units.
///
/// `K`/`k` values are taken as-is, `万` values are multiplied by ten. Two or
/// more numbers give the mean of the first two; one number is used alone.
/// Returns `None` for empty or negotiable text, a missing unit, or a number
/// too large to represent.
pub fn parse_salary(raw: &str) -> Option<f64> {
    if raw.is_empty() || raw == SALARY_NEGOTIABLE {
        return None;
    }

    let scale = if raw.contains(['K', 'k']) {
        1.0
    } else if raw.contains('万') {
        10.0
    } else {
        return None;
    };

    let mut runs = DIGIT_RUNS.find_iter(raw).map(|m| m.as_str().parse::<u64>());
    let first = runs.next()?.ok()? as f64 * scale;
    match runs.next() {
        Some(second) => Some((first + second.ok()? as f64 * scale) / 2.0),
        None => Some(first),
    }
}

/// One non-empty histogram bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBucket {
    pub range: String,
    pub count: usize,
    /// Share of all observations, 2 decimals.
    pub percentage: f64,
}

/// Summary of the normalized salaries in a corpus.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalaryStatistics {
    /// Mean, 2 decimals.
    pub avg: f64,
    pub min: i64,
    pub max: i64,
    pub median: i64,
    pub distribution: Vec<SalaryBucket>,
}

impl SalaryStatistics {
    /// Statistics over raw salary strings. Unparsable entries are skipped.
    pub fn from_raw<'a>(raw: impl IntoIterator<Item = &'a str>) -> Self {
        let observations: Vec<f64> = raw.into_iter().filter_map(parse_salary).collect();
        Self::from_observations(observations)
    }

    /// Statistics over normalized values. Zero observations give all zeros.
    pub fn from_observations(mut values: Vec<f64>) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len();
        let sum: f64 = values.iter().sum();
        let distribution = distribution(&values);

        values.sort_by(f64::total_cmp);
        let median = if n % 2 == 0 {
            (values[n / 2 - 1] + values[n / 2]) / 2.0
        } else {
            values[n / 2]
        };

        Self {
            avg: round_to(sum / n as f64, 2),
            min: values[0] as i64,
            max: values[n - 1] as i64,
            median: median as i64,
            distribution,
        }
    }
}

fn distribution(values: &[f64]) -> Vec<SalaryBucket> {
    let total = values.len() as f64;
    SALARY_BUCKETS
        .iter()
        .filter_map(|&(lo, hi, label)| {
            let count = values.iter().filter(|&&v| lo <= v && v < hi).count();
            (count > 0).then(|| SalaryBucket {
                range: label.to_string(),
                count,
                percentage: round_to(count as f64 / total * 100.0, 2),
            })
        })
        .collect()
}
