// Copyright 2026 Jobscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API for Jobscope.
//!
//! Crawl, statistics, analysis, word-cloud and listing endpoints over one
//! [`SharedState`]. Errors are returned as `{"detail": "..."}`.

use crate::config::DEFAULT_MAX_PAGES;
use crate::state::SharedState;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use jobscope::{AnalysisReport, Report, StatsReport, DEFAULT_QUERY_LIMIT};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::Notify;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all REST endpoints.
pub fn router(state: Arc<SharedState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/crawl", post(handle_crawl))
        .route("/api/stats/:keyword", get(handle_stats))
        .route("/api/analysis/:keyword", get(handle_analysis))
        .route("/api/wordcloud/:keyword", get(handle_wordcloud))
        .route("/api/jobs/:keyword", get(handle_jobs))
        .layer(cors)
        .with_state(state)
}

/// Serve the REST API on `host:port` until `shutdown` is notified.
pub async fn start(
    host: &str,
    port: u16,
    state: Arc<SharedState>,
    shutdown: Arc<Notify>,
) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("REST API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.notified().await })
        .await?;
    tracing::info!("REST API stopped");
    Ok(())
}

// ── Errors ──────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Run `f` on the blocking pool. Failures become 500s prefixed with `what`.
async fn blocking<T, F>(state: Arc<SharedState>, what: &str, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&SharedState) -> jobscope::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || f(&state)).await {
        Ok(Ok(v)) => Ok(v),
        Ok(Err(e)) => {
            tracing::warn!("{what}: {e}");
            Err(ApiError::Internal(format!("{what}: {e}")))
        }
        Err(e) => Err(ApiError::Internal(format!("{what}: task failed: {e}"))),
    }
}

// ── Handlers ────────────────────────────────────────────────────

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Jobscope 岗位分析 API",
        "status": "running",
    }))
}

async fn health(State(state): State<Arc<SharedState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.started_at.elapsed().as_secs_f64(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CrawlRequest {
    pub keyword: String,
    #[serde(default)]
    pub max_pages: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CrawlResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_ids: Option<Vec<i64>>,
}

fn validate_max_pages(raw: Option<i64>) -> Result<NonZeroU32, ApiError> {
    let n = raw.unwrap_or(DEFAULT_MAX_PAGES as i64);
    u32::try_from(n)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| ApiError::Validation(format!("max_pages must be a positive integer, got {n}")))
}

async fn handle_crawl(
    State(state): State<Arc<SharedState>>,
    Json(req): Json<CrawlRequest>,
) -> Result<Json<CrawlResponse>, ApiError> {
    let max_pages = validate_max_pages(req.max_pages)?;
    let outcome = state
        .crawl(&req.keyword, max_pages)
        .await
        .map_err(|e| ApiError::Internal(format!("爬取失败: {e:#}")))?;

    if outcome.job_ids.is_empty() {
        return Ok(Json(CrawlResponse {
            success: false,
            message: format!("未找到关键词 '{}' 相关的岗位", req.keyword),
            total_count: None,
            job_ids: None,
        }));
    }
    Ok(Json(CrawlResponse {
        success: true,
        message: format!("成功爬取 {} 个岗位", outcome.job_ids.len()),
        total_count: Some(outcome.job_ids.len()),
        job_ids: Some(outcome.job_ids),
    }))
}

async fn handle_stats(
    State(state): State<Arc<SharedState>>,
    Path(keyword): Path<String>,
) -> Result<Json<Report<StatsReport>>, ApiError> {
    let report = blocking(state, "统计失败", move |s| s.analyzer.statistics(&keyword)).await?;
    Ok(Json(report))
}

async fn handle_analysis(
    State(state): State<Arc<SharedState>>,
    Path(keyword): Path<String>,
) -> Result<Json<Report<AnalysisReport>>, ApiError> {
    let report = blocking(state, "分析失败", move |s| {
        s.analyzer.detailed_analysis(&keyword)
    })
    .await?;
    Ok(Json(report))
}

async fn handle_wordcloud(
    State(state): State<Arc<SharedState>>,
    Path(keyword): Path<String>,
) -> Result<Response, ApiError> {
    let (name, body) = blocking(state, "词云生成失败", move |s| {
        let path = s.render_word_cloud(&keyword)?;
        let body = std::fs::read(&path)?;
        Ok((format!("{keyword}_wordcloud.json"), body))
    })
    .await?;

    let disposition = format!("attachment; filename*=UTF-8''{}", percent_encode(&name));
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
struct JobsParams {
    limit: Option<usize>,
}

async fn handle_jobs(
    State(state): State<Arc<SharedState>>,
    Path(keyword): Path<String>,
    Query(params): Query<JobsParams>,
) -> Result<Json<Value>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_QUERY_LIMIT);
    let jobs = blocking(state, "查询失败", move |s| {
        s.store.query_by_keyword(&keyword, Some(limit))
    })
    .await?;
    Ok(Json(json!({ "count": jobs.len(), "jobs": jobs })))
}

/// RFC 5987 encoding for non-ASCII file names.
fn percent_encode(s: &str) -> String {
    s.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_max_pages() {
        assert_eq!(validate_max_pages(None).unwrap().get(), 5);
        assert_eq!(validate_max_pages(Some(2)).unwrap().get(), 2);
        assert!(validate_max_pages(Some(0)).is_err());
        assert!(validate_max_pages(Some(-3)).is_err());
        assert!(validate_max_pages(Some(i64::MAX)).is_err());
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("Go_wordcloud.json"), "Go_wordcloud.json");
        assert_eq!(percent_encode("数据"), "%E6%95%B0%E6%8D%AE");
        assert_eq!(percent_encode("C++"), "C%2B%2B");
    }

    #[test]
    fn test_api_error_status() {
        let resp = ApiError::Validation("bad".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let resp = ApiError::Internal("boom".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
