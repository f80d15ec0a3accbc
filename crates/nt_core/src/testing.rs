//! Scripted provider and scorer for tests in this and downstream crates.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use crate::search::{SearchHandle, SearchProvider};
use crate::sentiment::PolarityScorer;
use crate::types::{RawArticle, SearchRequest};
use crate::{Error, Result};

pub fn raw(title: &str, media: &str, desc: &str) -> RawArticle {
    RawArticle {
        title: Some(title.to_string()),
        media: Some(media.to_string()),
        date: Some("1 day ago".to_string()),
        desc: Some(desc.to_string()),
        link: Some(format!("https://example.com/{}&ved=track", title.replace(' ', "-"))),
    }
}

/// Serves pre-baked pages and records which pages were requested.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    pages: HashMap<u32, Vec<RawArticle>>,
    query_pages: HashMap<(String, u32), Vec<RawArticle>>,
    failing: HashSet<u32>,
    failing_queries: HashSet<String>,
    delay: Option<Duration>,
    requested: Mutex<Vec<u32>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, articles: Vec<RawArticle>) -> Self {
        self.pages.insert(page, articles);
        self
    }

    /// Serves `articles` for `page` only when searching `query`.
    pub fn with_query_page(mut self, query: &str, page: u32, articles: Vec<RawArticle>) -> Self {
        self.query_pages.insert((query.to_string(), page), articles);
        self
    }

    pub fn with_failing_page(mut self, page: u32) -> Self {
        self.failing.insert(page);
        self
    }

    /// Every page fails when searching `query`.
    pub fn with_failing_query(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    /// Every fetch sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchHandle> {
        Ok(SearchHandle { request: request.clone() })
    }

    async fn fetch_page(&self, handle: &SearchHandle, page: u32) -> Result<Vec<RawArticle>> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(page);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let query = &handle.request.query;
        if self.failing.contains(&page) || self.failing_queries.contains(query) {
            return Err(Error::Scraping(format!("page {} unavailable", page)));
        }
        if let Some(articles) = self.query_pages.get(&(query.clone(), page)) {
            return Ok(articles.clone());
        }
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }
}

/// Scores by keyword: "good" is positive, "bad" negative, anything else neutral.
#[derive(Debug, Default)]
pub struct KeywordScorer;

impl PolarityScorer for KeywordScorer {
    fn name(&self) -> &str {
        "keyword"
    }

    fn score(&self, text: &str) -> f64 {
        let text = text.to_lowercase();
        match (text.contains("good"), text.contains("bad")) {
            (true, false) => 0.5,
            (false, true) => -0.5,
            _ => 0.0,
        }
    }
}
