use std::fmt;
use nt_core::PolarityScorer;

/// Scores every text as neutral. Useful when sentiment is not wanted.
pub struct DummyScorer;

impl fmt::Debug for DummyScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyScorer").finish()
    }
}

impl DummyScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for DummyScorer {
    fn name(&self) -> &str {
        "Dummy"
    }

    fn score(&self, _text: &str) -> f64 {
        0.0
    }
}
