use serde::{Deserialize, Serialize};

pub mod models;

/// Scorer selection for the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub model_name: Option<String>,
}

impl Config {
    pub fn with_model(name: impl Into<String>) -> Self {
        Self {
            model_name: Some(name.into()),
        }
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::create_scorer;
    pub use nt_core::{PolarityScorer, Result, Error};
}

pub use models::create_scorer;
