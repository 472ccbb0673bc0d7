//! Extract postings from JSON payloads embedded in `<script>` tags.
//!
//! Listing pages often ship their initial data as a JavaScript assignment
//! (`window.__INITIAL_STATE__ = {...};`, `jobList: [...]`). A regex locates
//! the opening bracket of a known container and `serde_json` parses exactly
//! one balanced value from there, so nested arrays and trailing script code
//! do not confuse the extraction.

use super::strategy::PageContext;
use crate::types::{Field, JobPosting};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;

/// Container patterns, tried in order. Each must end on the opening
/// bracket of the JSON value to parse.
pub const PAYLOAD_PATTERNS: &[&str] = &[
    r"window\.__INITIAL_STATE__\s*=\s*\{",
    r#"jobList"?\s*[:=]\s*\["#,
    r#"geekList"?\s*[:=]\s*\["#,
];

/// Paths searched for the job array when the payload is an object.
pub const LIST_PATHS: &[&[&str]] = &[&["jobList"], &["geekList"], &["data", "jobList"]];

/// Source keys per field, first non-empty wins.
pub const FIELD_ALIASES: &[(Field, &[&str])] = &[
    (Field::Title, &["jobName", "title"]),
    (Field::Company, &["brandName", "company"]),
    (Field::Salary, &["salaryDesc", "salary"]),
    (Field::Area, &["cityName", "area"]),
    (Field::Experience, &["experienceName", "experience"]),
    (Field::Education, &["degreeName", "education"]),
    (Field::Description, &["jobDesc", "description"]),
];

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PAYLOAD_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

static SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("script selector is valid"));

/// Extract postings from the first embedded payload that yields any.
pub fn extract(document: &Html, ctx: &PageContext<'_>) -> Vec<JobPosting> {
    for script in document.select(&SCRIPT) {
        let text: String = script.text().collect();
        if text.trim().is_empty() {
            continue;
        }
        let jobs = extract_from_script(&text, ctx);
        if !jobs.is_empty() {
            return jobs;
        }
    }
    Vec::new()
}

/// Try every container pattern against one script body.
pub fn extract_from_script(text: &str, ctx: &PageContext<'_>) -> Vec<JobPosting> {
    for pattern in PATTERNS.iter() {
        let Some(m) = pattern.find(text) else {
            continue;
        };
        // The match ends on the opening bracket.
        let start = m.end() - 1;
        let payload = match parse_value_at(&text[start..]) {
            Some(v) => v,
            None => {
                tracing::debug!("embedded payload at {} is not valid JSON", m.start());
                continue;
            }
        };
        let jobs = jobs_from_value(&payload, ctx);
        if !jobs.is_empty() {
            return jobs;
        }
    }
    Vec::new()
}

/// Parse a single JSON value from the start of `text`, ignoring what follows.
fn parse_value_at(text: &str) -> Option<Value> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .next()?
        .ok()
}

/// Map a parsed payload (object or array) into postings.
pub fn jobs_from_value(payload: &Value, ctx: &PageContext<'_>) -> Vec<JobPosting> {
    let Some(items) = job_array(payload) else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.is_object())
        .map(|item| map_item(item, ctx))
        .collect()
}

fn job_array(payload: &Value) -> Option<&Vec<Value>> {
    if let Some(arr) = payload.as_array() {
        return Some(arr);
    }
    LIST_PATHS.iter().find_map(|path| {
        let mut cur = payload;
        for key in *path {
            cur = cur.get(key)?;
        }
        cur.as_array().filter(|a| !a.is_empty())
    })
}

/// Map one JSON object through [`FIELD_ALIASES`].
pub fn map_item(item: &Value, ctx: &PageContext<'_>) -> JobPosting {
    let mut job = JobPosting::placeholder(ctx.keyword, ctx.crawl_time);
    for (field, aliases) in FIELD_ALIASES {
        if let Some(value) = first_alias(item, aliases) {
            job.set(*field, value);
        }
    }
    job
}

fn first_alias(item: &Value, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|key| match item.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
