use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{RawArticle, SearchRequest};
use crate::Result;

/// An opened search, handed back to the provider for every page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHandle {
    pub request: SearchRequest,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns the name of the provider
    fn name(&self) -> &str;

    /// Opens a search for the given query, locale and date range
    async fn search(&self, request: &SearchRequest) -> Result<SearchHandle>;

    /// Fetches one page of results; pages are 1-based. The provider may
    /// repeat results across pages.
    async fn fetch_page(&self, handle: &SearchHandle, page: u32) -> Result<Vec<RawArticle>>;
}
