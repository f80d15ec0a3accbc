//! Source filtering and sentiment summaries over an accumulated result set.
//!
//! Everything here is recomputed from the records on each call; nothing is
//! cached between merges.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::accumulator::AccumulatorState;
use crate::sentiment::SentimentClassifier;
use crate::types::{ArticleRecord, ScoredArticle, Sentiment};

/// Sources to keep. An empty filter keeps every source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFilter(BTreeSet<String>);

impl SourceFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    pub fn accepts(&self, record: &ArticleRecord) -> bool {
        self.0.is_empty() || self.0.contains(&record.source)
    }
}

impl<S: Into<String>> FromIterator<S> for SourceFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn add(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Row-normalizes to percentages; an empty row stays all zero.
    pub fn percentages(&self) -> SentimentShare {
        let total = self.total();
        if total == 0 {
            return SentimentShare::default();
        }
        let pct = |n: usize| n as f64 * 100.0 / total as f64;
        SentimentShare {
            positive: pct(self.positive),
            neutral: pct(self.neutral),
            negative: pct(self.negative),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentShare {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentShare {
    pub fn total(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Counts {
    pub total: usize,
    pub by_sentiment: SentimentCounts,
    pub by_source_by_sentiment: BTreeMap<String, SentimentCounts>,
    pub by_source_by_percent: BTreeMap<String, SentimentShare>,
}

impl Counts {
    pub fn from_articles(articles: &[ScoredArticle]) -> Self {
        let mut by_sentiment = SentimentCounts::default();
        let mut by_source_by_sentiment: BTreeMap<String, SentimentCounts> = BTreeMap::new();

        for article in articles {
            by_sentiment.add(article.sentiment);
            by_source_by_sentiment
                .entry(article.record.source.clone())
                .or_default()
                .add(article.sentiment);
        }

        let by_source_by_percent = by_source_by_sentiment
            .iter()
            .map(|(source, counts)| (source.clone(), counts.percentages()))
            .collect();

        Self {
            total: articles.len(),
            by_sentiment,
            by_source_by_sentiment,
            by_source_by_percent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct View {
    pub articles: Vec<ScoredArticle>,
    pub counts: Counts,
}

/// Filters the accumulated records by source, scores the survivors and
/// summarizes them. Record order is preserved.
pub fn view(state: &AccumulatorState, filter: &SourceFilter, classifier: &SentimentClassifier) -> View {
    let articles: Vec<ScoredArticle> = state
        .records()
        .iter()
        .filter(|record| filter.accepts(record))
        .map(|record| classifier.score_article(record))
        .collect();
    let counts = Counts::from_articles(&articles);
    View { articles, counts }
}
