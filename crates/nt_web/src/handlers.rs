use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveDate};
use nt_core::{
    config::cap_pages, view, Counts, DateRange, Error, LoadMoreOutcome, Phase, ScoredArticle,
    SearchOutcome, SourceFilter,
};
use nt_storage::{export, export_filename, ExportFormat, SessionId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub provider: String,
    pub model: String,
    pub sessions: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: SessionId,
}

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    pub query: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pages: Option<u32>,
}

/// Session progress returned after every search or load-more.
#[derive(Debug, Serialize)]
pub struct Progress {
    pub phase: Phase,
    pub current_page: u32,
    pub total: usize,
    pub sources_encountered: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub outcome: SearchOutcome,
    pub progress: Progress,
}

#[derive(Debug, Serialize)]
pub struct LoadMoreResponse {
    pub outcome: LoadMoreOutcome,
    pub progress: Progress,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    /// Comma-separated source names; empty or missing keeps every source.
    pub sources: Option<String>,
}

impl ViewParams {
    fn filter(&self) -> SourceFilter {
        self.sources
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub query: Option<String>,
    pub progress: Progress,
    pub articles: Vec<ScoredArticle>,
    pub counts: Counts,
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        provider: state.sessions.provider_name().to_string(),
        model: state.classifier.scorer_name().to_string(),
        sessions: state.sessions.len().await,
    })
}

pub async fn create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
) -> ApiResult<StatusCode> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<Progress>> {
    state.sessions.reset(id).await?;
    Ok(Json(progress(&state, id).await?))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
    Json(body): Json<SearchBody>,
) -> ApiResult<Json<SearchResponse>> {
    let range = DateRange::new(body.start_date, body.end_date)?;
    let request = state.config.request(body.query, range);
    let pages = cap_pages(body.pages.unwrap_or(state.config.max_pages));

    let outcome = state.sessions.search(id, request, pages).await?;
    let progress = progress(&state, id).await?;
    Ok(Json(SearchResponse { outcome, progress }))
}

pub async fn load_more(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
) -> ApiResult<Json<LoadMoreResponse>> {
    let outcome = state.sessions.load_more(id).await?;
    let progress = progress(&state, id).await?;
    Ok(Json(LoadMoreResponse { outcome, progress }))
}

pub async fn get_view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SessionId>,
    Query(params): Query<ViewParams>,
) -> ApiResult<Json<ViewResponse>> {
    let filter = params.filter();
    let response = state
        .sessions
        .with_session(id, |controller| {
            let view = view(controller.state(), &filter, &state.classifier);
            ViewResponse {
                query: controller.request().map(|r| r.query.clone()),
                progress: Progress::of(controller),
                articles: view.articles,
                counts: view.counts,
            }
        })
        .await?;
    Ok(Json(response))
}

pub async fn export_view(
    State(state): State<Arc<AppState>>,
    Path((id, format)): Path<(SessionId, String)>,
    Query(params): Query<ViewParams>,
) -> ApiResult<impl IntoResponse> {
    let format: ExportFormat = format.parse()?;
    let filter = params.filter();

    let (query, articles) = state
        .sessions
        .with_session(id, |controller| {
            let query = controller.request().map(|r| r.query.clone());
            (query, view(controller.state(), &filter, &state.classifier).articles)
        })
        .await?;
    let query = query.ok_or_else(|| Error::InvalidState("nothing to export before a search".to_string()))?;

    let bytes = export(&articles, format)?;
    let filename = export_filename(&query, format, Local::now().date_naive());
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        bytes,
    ))
}

impl Progress {
    fn of(controller: &nt_core::PaginationController) -> Self {
        let state = controller.state();
        Self {
            phase: controller.phase(),
            current_page: state.current_page(),
            total: state.len(),
            sources_encountered: state.sources_encountered().to_vec(),
        }
    }
}

async fn progress(state: &AppState, id: SessionId) -> ApiResult<Progress> {
    Ok(state.sessions.with_session(id, Progress::of).await?)
}
