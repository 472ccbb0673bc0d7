//! Record store capability and an in-memory implementation.
//!
//! Stores are append-only: postings are never updated or deleted through
//! this interface. Reads return postings most recent first, ordered by
//! `crawl_time` descending and then by insertion order descending.

use crate::types::{Error, JobPosting, Result, StoredJob, CRAWL_TIME_FORMAT};
use std::sync::RwLock;

/// Default row limit for [`JobStore::query_by_keyword`].
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Append/query access to persisted job postings.
///
/// Keyword filters use substring containment: a query for `"developer"`
/// matches postings whose keyword contains that text.
pub trait JobStore: Send + Sync {
    /// Append one posting and return its assigned id.
    fn append(&self, job: &JobPosting) -> Result<i64>;

    /// Append a batch of postings, returning their ids in order.
    fn append_batch(&self, jobs: &[JobPosting]) -> Result<Vec<i64>> {
        jobs.iter().map(|job| self.append(job)).collect()
    }

    /// Postings whose keyword contains `keyword`, most recent first.
    fn query_by_keyword(&self, keyword: &str, limit: Option<usize>) -> Result<Vec<StoredJob>>;

    /// Every posting, optionally filtered by keyword, most recent first.
    fn all(&self, keyword: Option<&str>) -> Result<Vec<StoredJob>>;
}

/// A [`JobStore`] held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<StoredJob>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored postings.
    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    /// Whether the store holds no postings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matching(&self, keyword: Option<&str>) -> Result<Vec<StoredJob>> {
        let rows = self
            .rows
            .read()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))?;

        let mut out: Vec<StoredJob> = rows
            .iter()
            .rev()
            .filter(|row| keyword.map_or(true, |kw| row.job.keyword.contains(kw)))
            .cloned()
            .collect();
        // Stable: rows with equal crawl_time keep newest-insert-first order.
        out.sort_by(|a, b| b.job.crawl_time.cmp(&a.job.crawl_time));
        Ok(out)
    }
}

impl JobStore for MemoryStore {
    fn append(&self, job: &JobPosting) -> Result<i64> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))?;
        let id = rows.len() as i64 + 1;
        rows.push(StoredJob {
            id,
            job: job.clone(),
            created_at: chrono::Local::now().format(CRAWL_TIME_FORMAT).to_string(),
        });
        Ok(id)
    }

    fn query_by_keyword(&self, keyword: &str, limit: Option<usize>) -> Result<Vec<StoredJob>> {
        let mut rows = self.matching(Some(keyword))?;
        rows.truncate(limit.unwrap_or(DEFAULT_QUERY_LIMIT));
        Ok(rows)
    }

    fn all(&self, keyword: Option<&str>) -> Result<Vec<StoredJob>> {
        self.matching(keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn job(keyword: &str, title: &str, crawl_time: &str) -> JobPosting {
        let mut j = JobPosting::placeholder(keyword, crawl_time);
        j.title = title.to_string();
        j
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let ids = store
            .append_batch(&[
                job("rust", "a", "2026-01-01 10:00:00"),
                job("rust", "b", "2026-01-01 10:00:00"),
            ])
            .unwrap();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_substring_keyword_match() {
        let store = MemoryStore::new();
        store.append(&job("senior developer", "a", "2026-01-01 10:00:00")).unwrap();
        store.append(&job("designer", "b", "2026-01-01 10:00:00")).unwrap();

        let rows = store.all(Some("developer")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].job.title, "a");
        assert_eq!(store.all(None).unwrap().len(), 2);
    }

    #[test]
    fn test_most_recent_first() {
        let store = MemoryStore::new();
        store.append(&job("go", "old", "2026-01-01 10:00:00")).unwrap();
        store.append(&job("go", "new", "2026-01-02 10:00:00")).unwrap();
        store.append(&job("go", "same-time-later", "2026-01-02 10:00:00")).unwrap();

        let titles: Vec<_> = store
            .all(Some("go"))
            .unwrap()
            .into_iter()
            .map(|r| r.job.title)
            .collect();
        assert_eq!(titles, vec!["same-time-later", "new", "old"]);
    }

    #[test]
    fn test_query_limit() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .append(&job("java", &format!("t{i}"), "2026-01-01 10:00:00"))
                .unwrap();
        }
        assert_eq!(store.query_by_keyword("java", Some(3)).unwrap().len(), 3);
        assert_eq!(store.query_by_keyword("java", None).unwrap().len(), 5);
    }

    #[test]
    fn test_concurrent_append_and_read() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        store
                            .append(&job("py", &format!("{t}-{i}"), "2026-01-01 10:00:00"))
                            .unwrap();
                        let _ = store.all(Some("py")).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 100);
    }
}
