use std::sync::Arc;
use nt_core::{Error, PolarityScorer, Result};
use tracing::info;

use crate::Config;

pub mod dummy;
pub mod lexicon;

pub use dummy::DummyScorer;
pub use lexicon::LexiconScorer;

pub const DEFAULT_MODEL: &str = "lexicon";

pub fn create_scorer(config: Option<Config>) -> Result<Arc<dyn PolarityScorer>> {
    let config = config.unwrap_or_default();
    let name = config.model_name.as_deref().unwrap_or(DEFAULT_MODEL).to_lowercase();

    let scorer: Arc<dyn PolarityScorer> = match name.as_str() {
        "lexicon" => Arc::new(LexiconScorer::new()),
        "dummy" => Arc::new(DummyScorer::new()),
        other => {
            return Err(Error::Validation(format!(
                "Unknown sentiment model: {} (available: lexicon, dummy)",
                other
            )))
        }
    };
    info!("🧠 Sentiment model ready: {}", scorer.name());
    Ok(scorer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_scorer_by_name() {
        assert_eq!(create_scorer(None).unwrap().name(), "Lexicon");
        assert_eq!(create_scorer(Some(Config::with_model("dummy"))).unwrap().name(), "Dummy");
        assert_eq!(create_scorer(Some(Config::with_model("LEXICON"))).unwrap().name(), "Lexicon");
        assert!(matches!(
            create_scorer(Some(Config::with_model("gpt"))),
            Err(Error::Validation(_))
        ));
    }
}
