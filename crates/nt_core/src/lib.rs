pub mod accumulator;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod search;
pub mod sentiment;
pub mod types;
pub mod view;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use accumulator::AccumulatorState;
pub use config::SearchConfig;
pub use error::{Error, Result};
pub use pagination::{LoadMoreOutcome, NoResultsReason, PaginationController, Phase, SearchOutcome};
pub use search::{SearchHandle, SearchProvider};
pub use sentiment::{Classification, PolarityScorer, SentimentClassifier};
pub use types::{ArticleRecord, DateRange, RawArticle, ScoredArticle, SearchRequest, Sentiment};
pub use view::{view, Counts, SentimentCounts, SentimentShare, SourceFilter, View};
