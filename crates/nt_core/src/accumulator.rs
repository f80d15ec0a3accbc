use serde::Serialize;
use std::collections::HashSet;

use crate::types::ArticleRecord;

/// The running, deduplicated result set of one search session.
///
/// Records keep discovery order across pages. Sources keep first-seen order
/// and feed the source filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccumulatorState {
    records: Vec<ArticleRecord>,
    #[serde(skip)]
    seen_titles: HashSet<String>,
    sources_encountered: Vec<String>,
    current_page: u32,
}

impl AccumulatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn sources_encountered(&self) -> &[String] {
        &self.sources_encountered
    }

    /// Last page that contributed at least one record; 0 before any fetch.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.seen_titles.contains(title)
    }

    /// Appends every record whose title has not been seen yet, in batch order,
    /// and returns how many were appended. Re-merging a batch appends nothing.
    pub fn merge<I>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = ArticleRecord>,
    {
        let mut new_count = 0;
        for record in batch {
            if self.seen_titles.contains(&record.title) {
                continue;
            }
            if !self.sources_encountered.iter().any(|s| s == &record.source) {
                self.sources_encountered.push(record.source.clone());
            }
            self.seen_titles.insert(record.title.clone());
            self.records.push(record);
            new_count += 1;
        }
        new_count
    }

    pub(crate) fn set_current_page(&mut self, page: u32) {
        self.current_page = page;
    }
}
