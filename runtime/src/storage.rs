// Copyright 2026 Jobscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! SQLite-backed job store.

use anyhow::{Context, Result};
use jobscope::{Error, JobPosting, JobStore, StoredJob, DEFAULT_QUERY_LIMIT};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS jobs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        company TEXT,
        salary TEXT,
        area TEXT,
        experience TEXT,
        education TEXT,
        description TEXT,
        keyword TEXT,
        crawl_time TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS idx_keyword ON jobs(keyword);
    CREATE INDEX IF NOT EXISTS idx_title ON jobs(title);
    CREATE INDEX IF NOT EXISTS idx_crawl_time ON jobs(crawl_time);
";

const INSERT: &str = "INSERT INTO jobs
    (title, company, salary, area, experience, education, description, keyword, crawl_time)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

const SELECT_COLUMNS: &str = "SELECT id, title, company, salary, area, experience, education,
    description, keyword, crawl_time, created_at FROM jobs";

/// Job store backed by a single SQLite connection.
pub struct SqliteJobStore {
    db: Mutex<Connection>,
}

impl SqliteJobStore {
    /// Open or create a store at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let db = Connection::open(path)
            .with_context(|| format!("failed to open job store: {}", path.display()))?;
        Self::init(db)
    }

    /// A store that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(db: Connection) -> Result<Self> {
        db.execute_batch(SCHEMA)
            .context("failed to create jobs table")?;
        Ok(Self { db: Mutex::new(db) })
    }

    fn conn(&self) -> jobscope::Result<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| Error::Store("job store lock poisoned".to_string()))
    }

    fn select(
        &self,
        keyword: Option<&str>,
        limit: Option<usize>,
    ) -> jobscope::Result<Vec<StoredJob>> {
        let db = self.conn()?;
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let sql = format!(
            "{SELECT_COLUMNS}
             WHERE ?1 IS NULL OR instr(keyword, ?1) > 0
             ORDER BY crawl_time DESC, id DESC
             LIMIT ?2"
        );
        let mut stmt = db.prepare(&sql).map_err(store_error)?;
        let rows = stmt
            .query_map(params![keyword, limit], stored_job)
            .map_err(store_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(store_error)
    }
}

impl JobStore for SqliteJobStore {
    fn append(&self, job: &JobPosting) -> jobscope::Result<i64> {
        let db = self.conn()?;
        insert(&db, job).map_err(store_error)
    }

    /// All postings in one transaction; nothing is written if any insert
    /// fails.
    fn append_batch(&self, jobs: &[JobPosting]) -> jobscope::Result<Vec<i64>> {
        let mut db = self.conn()?;
        let tx = db.transaction().map_err(store_error)?;
        let ids = jobs
            .iter()
            .map(|job| insert(&tx, job))
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(store_error)?;
        tx.commit().map_err(store_error)?;
        Ok(ids)
    }

    fn query_by_keyword(
        &self,
        keyword: &str,
        limit: Option<usize>,
    ) -> jobscope::Result<Vec<StoredJob>> {
        self.select(Some(keyword), Some(limit.unwrap_or(DEFAULT_QUERY_LIMIT)))
    }

    fn all(&self, keyword: Option<&str>) -> jobscope::Result<Vec<StoredJob>> {
        self.select(keyword, None)
    }
}

fn insert(db: &Connection, job: &JobPosting) -> rusqlite::Result<i64> {
    db.execute(
        INSERT,
        params![
            job.title,
            job.company,
            job.salary,
            job.area,
            job.experience,
            job.education,
            job.description,
            job.keyword,
            job.crawl_time,
        ],
    )?;
    Ok(db.last_insert_rowid())
}

fn stored_job(row: &Row<'_>) -> rusqlite::Result<StoredJob> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };
    Ok(StoredJob {
        id: row.get(0)?,
        job: JobPosting {
            title: text(1)?,
            company: text(2)?,
            salary: text(3)?,
            area: text(4)?,
            experience: text(5)?,
            education: text(6)?,
            description: text(7)?,
            keyword: text(8)?,
            crawl_time: text(9)?,
        },
        created_at: text(10)?,
    })
}

fn store_error(e: rusqlite::Error) -> Error {
    Error::Store(e.to_string())
}
