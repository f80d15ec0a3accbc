//! Page-by-page search driver for one session.
//!
//! A controller starts `Idle`. A successful `start_search` moves it to
//! `Ready` with page 1 merged; every `load_more` fetches the page after the
//! last one that contributed a record. Both operations take `&mut self`, so
//! a controller never runs two fetch-and-merge steps at once; callers that
//! share a controller put it behind a lock (see the session store).

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::accumulator::AccumulatorState;
use crate::normalize::normalize_page;
use crate::search::{SearchHandle, SearchProvider};
use crate::types::{RawArticle, SearchRequest};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "message")]
pub enum NoResultsReason {
    /// Page 1 held no usable records.
    Empty,
    /// The provider could not deliver page 1.
    ProviderFailure(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Loaded { page: u32, new_count: usize },
    NoResults { reason: NoResultsReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadMoreOutcome {
    Loaded { page: u32, new_count: usize },
    /// The page only repeated known articles; the page counter did not move.
    Exhausted { page: u32 },
    /// The provider failed; accumulated results are untouched.
    Failed { page: u32, message: String },
    /// Another fetch for this session was still running.
    Busy,
}

pub struct PaginationController {
    provider: Arc<dyn SearchProvider>,
    phase: Phase,
    handle: Option<SearchHandle>,
    state: AccumulatorState,
}

impl PaginationController {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            phase: Phase::Idle,
            handle: None,
            state: AccumulatorState::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &AccumulatorState {
        &self.state
    }

    pub fn request(&self) -> Option<&SearchRequest> {
        self.handle.as_ref().map(|h| &h.request)
    }

    /// Replaces the session with a fresh search and merges page 1.
    ///
    /// An invalid request is rejected before anything changes. The previous
    /// results are only dropped once page 1 arrives with records; a failed or
    /// empty page 1 is reported as no results and leaves the session as it was.
    pub async fn start_search(&mut self, request: SearchRequest) -> Result<SearchOutcome> {
        request.validate()?;
        info!("🔎 Searching {} for {:?}", self.provider.name(), request.query);

        let (handle, records) = match self.open_and_fetch_first(&request).await {
            Ok((handle, raw)) => (handle, normalize_page(raw)),
            Err(e) if e.is_provider_failure() => {
                warn!("⚠️ Search for {:?} failed: {}", request.query, e);
                return Ok(SearchOutcome::NoResults {
                    reason: NoResultsReason::ProviderFailure(e.to_string()),
                });
            }
            Err(e) => return Err(e),
        };

        if records.is_empty() {
            info!("📭 No articles found for {:?}", request.query);
            return Ok(SearchOutcome::NoResults { reason: NoResultsReason::Empty });
        }

        self.reset();
        let new_count = self.state.merge(records);
        self.state.set_current_page(1);
        self.handle = Some(handle);
        self.phase = Phase::Ready;
        info!("✨ Page 1 merged: {} unique articles", new_count);

        Ok(SearchOutcome::Loaded { page: 1, new_count })
    }

    /// Fetches the page after the last productive one and merges it.
    pub async fn load_more(&mut self) -> Result<LoadMoreOutcome> {
        let handle = match (self.phase, self.handle.as_ref()) {
            (Phase::Ready, Some(handle)) => handle,
            _ => {
                return Err(Error::InvalidState(
                    "load more requires a completed search".to_string(),
                ))
            }
        };

        let page = self.state.current_page() + 1;
        let raw = match self.provider.fetch_page(handle, page).await {
            Ok(raw) => raw,
            Err(e) if e.is_provider_failure() => {
                warn!("⚠️ Page {} failed: {}", page, e);
                return Ok(LoadMoreOutcome::Failed { page, message: e.to_string() });
            }
            Err(e) => return Err(e),
        };

        let new_count = self.state.merge(normalize_page(raw));
        if new_count == 0 {
            info!("📭 Page {} held no new articles", page);
            return Ok(LoadMoreOutcome::Exhausted { page });
        }

        self.state.set_current_page(page);
        info!("✨ Page {} merged: {} new articles ({} total)", page, new_count, self.state.len());
        Ok(LoadMoreOutcome::Loaded { page, new_count })
    }

    /// Runs a search and keeps loading until `pages` pages have been merged or
    /// a page brings nothing new. The outcome reports the last merged page and
    /// the total number of articles collected.
    pub async fn prefetch(&mut self, request: SearchRequest, pages: u32) -> Result<SearchOutcome> {
        if pages == 0 {
            return Err(Error::Validation("page budget must be at least 1".to_string()));
        }

        let outcome = self.start_search(request).await?;
        if !matches!(outcome, SearchOutcome::Loaded { .. }) {
            return Ok(outcome);
        }

        while self.state.current_page() < pages {
            match self.load_more().await? {
                LoadMoreOutcome::Loaded { .. } => {}
                _ => break,
            }
        }

        Ok(SearchOutcome::Loaded {
            page: self.state.current_page(),
            new_count: self.state.len(),
        })
    }

    /// Drops the current search and every accumulated article.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.handle = None;
        self.state = AccumulatorState::new();
    }

    async fn open_and_fetch_first(
        &self,
        request: &SearchRequest,
    ) -> Result<(SearchHandle, Vec<RawArticle>)> {
        let handle = self.provider.search(request).await?;
        let raw = self.provider.fetch_page(&handle, 1).await?;
        Ok((handle, raw))
    }
}
