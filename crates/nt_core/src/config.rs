use serde::{Deserialize, Serialize};

use crate::types::{DateRange, SearchRequest};

pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_REGION: &str = "IN";
pub const DEFAULT_MAX_PAGES: u32 = 3;
pub const MAX_PAGES_LIMIT: u32 = 10;

/// Provider-facing search settings shared by every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub lang: String,
    pub region: String,
    pub max_pages: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_string(),
            region: DEFAULT_REGION.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl SearchConfig {
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.clamp(1, MAX_PAGES_LIMIT);
        self
    }

    pub fn request(&self, query: impl Into<String>, range: DateRange) -> SearchRequest {
        SearchRequest {
            query: query.into(),
            range,
            lang: self.lang.clone(),
            region: self.region.clone(),
        }
    }
}

/// Caps a requested page budget at [`MAX_PAGES_LIMIT`]. A budget of 0 is
/// left alone so that `prefetch` rejects it.
pub fn cap_pages(pages: u32) -> u32 {
    pages.min(MAX_PAGES_LIMIT)
}
