use std::fmt;
use std::sync::Arc;

use crate::types::{ArticleRecord, ScoredArticle, Sentiment};

pub trait PolarityScorer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Polarity of `text` in [-1.0, 1.0]. Empty text should score 0.0.
    fn score(&self, text: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub score: f64,
    pub label: Sentiment,
}

/// Maps scorer output onto the three sentiment labels.
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub fn classify(&self, text: &str) -> Classification {
        let raw = self.scorer.score(text);
        let score = if raw.is_nan() { 0.0 } else { raw.clamp(-1.0, 1.0) };
        Classification {
            score,
            label: Sentiment::from_score(score),
        }
    }

    /// Scores an article by its description.
    pub fn score_article(&self, record: &ArticleRecord) -> ScoredArticle {
        let Classification { score, label } = self.classify(&record.description);
        ScoredArticle {
            record: record.clone(),
            polarity: score,
            sentiment: label,
        }
    }
}
