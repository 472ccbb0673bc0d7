//! Core data types for job postings and the errors shared by every module.

use serde::{Deserialize, Serialize};

/// Placeholder company name when none can be extracted.
pub const COMPANY_UNKNOWN: &str = "未知公司";

/// Salary text used by the source for "negotiable".
pub const SALARY_NEGOTIABLE: &str = "面议";

/// Placeholder area when none can be extracted.
pub const AREA_UNKNOWN: &str = "未知地区";

/// Experience / education requirement when unspecified.
pub const UNLIMITED: &str = "不限";

/// Message carried by every "no data" report.
pub const NO_DATA_MESSAGE: &str = "暂无数据";

/// Format of [`JobPosting::crawl_time`].
pub const CRAWL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A normalized job posting.
///
/// Every field is always present; missing source data is represented by the
/// sentinel constants in this module, never by an empty `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub salary: String,
    pub area: String,
    pub experience: String,
    pub education: String,
    pub description: String,
    pub keyword: String,
    pub crawl_time: String,
}

impl JobPosting {
    /// A posting with every field at its sentinel default.
    pub fn placeholder(keyword: &str, crawl_time: &str) -> Self {
        Self {
            title: placeholder_title(keyword),
            company: COMPANY_UNKNOWN.to_string(),
            salary: SALARY_NEGOTIABLE.to_string(),
            area: AREA_UNKNOWN.to_string(),
            experience: UNLIMITED.to_string(),
            education: UNLIMITED.to_string(),
            description: String::new(),
            keyword: keyword.to_string(),
            crawl_time: crawl_time.to_string(),
        }
    }

    /// Overwrite one field by name.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.title = value,
            Field::Company => self.company = value,
            Field::Salary => self.salary = value,
            Field::Area => self.area = value,
            Field::Experience => self.experience = value,
            Field::Education => self.education = value,
            Field::Description => self.description = value,
        }
    }
}

/// Title used when a posting has no extractable title.
pub fn placeholder_title(keyword: &str) -> String {
    format!("{keyword}相关岗位")
}

/// Current local time in [`CRAWL_TIME_FORMAT`].
pub fn crawl_timestamp() -> String {
    chrono::Local::now().format(CRAWL_TIME_FORMAT).to_string()
}

/// The extractable fields of a [`JobPosting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Company,
    Salary,
    Area,
    Experience,
    Education,
    Description,
}

/// A posting read back from a store, with its store-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredJob {
    pub id: i64,
    #[serde(flatten)]
    pub job: JobPosting,
    pub created_at: String,
}

/// Failure of the page-fetch capability.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected status code {0}")]
    Status(u16),
}

/// Errors that can occur in the jobscope library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Sink error: {0}")]
    Sink(String),

    #[error("No terms to render")]
    EmptyTermStream,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_uses_sentinels() {
        let job = JobPosting::placeholder("Rust", "2026-01-01 00:00:00");
        assert_eq!(job.title, "Rust相关岗位");
        assert_eq!(job.company, COMPANY_UNKNOWN);
        assert_eq!(job.salary, SALARY_NEGOTIABLE);
        assert_eq!(job.area, AREA_UNKNOWN);
        assert_eq!(job.experience, UNLIMITED);
        assert_eq!(job.education, UNLIMITED);
        assert!(job.description.is_empty());
        assert_eq!(job.keyword, "Rust");
    }

    #[test]
    fn test_empty_keyword_propagates() {
        let job = JobPosting::placeholder("", "2026-01-01 00:00:00");
        assert_eq!(job.title, "相关岗位");
        assert_eq!(job.keyword, "");
    }

    #[test]
    fn test_crawl_timestamp_format() {
        let ts = crawl_timestamp();
        assert_eq!(ts.len(), 19);
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, CRAWL_TIME_FORMAT).is_ok());
    }

    #[test]
    fn test_stored_job_serializes_flat() {
        let stored = StoredJob {
            id: 7,
            job: JobPosting::placeholder("Go", "2026-01-01 00:00:00"),
            created_at: "2026-01-01 00:00:01".to_string(),
        };
        let v = serde_json::to_value(&stored).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["title"], "Go相关岗位");
        assert_eq!(v["keyword"], "Go");
    }
}
