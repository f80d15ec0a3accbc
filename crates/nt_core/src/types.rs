use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// One result row as the search provider hands it over, before any cleanup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub media: Option<String>,
    pub date: Option<String>,
    pub desc: Option<String>,
    pub link: Option<String>,
}

/// A normalized news item. The title is the dedup key within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub source: String,
    pub published_date: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Total over every score; NaN is treated as neutral.
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Sentiment::Positive
        } else if score < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::Validation(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }
}

/// Everything needed to open a search against the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub range: DateRange,
    pub lang: String,
    pub region: String,
}

impl SearchRequest {
    /// Checks the request before anything is fetched.
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(Error::Validation("search query must not be empty".to_string()));
        }
        if self.range.start > self.range.end {
            return Err(Error::Validation(format!(
                "start date {} is after end date {}",
                self.range.start, self.range.end
            )));
        }
        Ok(())
    }
}

/// A record together with its derived polarity and label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub record: ArticleRecord,
    pub polarity: f64,
    pub sentiment: Sentiment,
}
