use std::sync::Arc;
use nt_core::{SearchConfig, SentimentClassifier};
use nt_storage::SessionStore;

pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub classifier: SentimentClassifier,
    pub config: SearchConfig,
}

impl AppState {
    pub fn new(sessions: Arc<SessionStore>, classifier: SentimentClassifier, config: SearchConfig) -> Self {
        Self {
            sessions,
            classifier,
            config,
        }
    }
}
