//! Word-list polarity scoring.
//!
//! Each sentiment-bearing word contributes its lexicon polarity. A preceding
//! intensifier scales it and a preceding negation flips and halves it. The
//! text scores the mean contribution, so text without sentiment words is 0.0.

use lazy_static::lazy_static;
use nt_core::PolarityScorer;
use std::collections::HashMap;
use std::fmt;

const NEGATION_FACTOR: f64 = -0.5;

lazy_static! {
    static ref POLARITY: HashMap<&'static str, f64> = [
        ("good", 0.7), ("great", 0.8), ("excellent", 1.0), ("best", 1.0),
        ("better", 0.5), ("positive", 0.23), ("success", 0.3), ("successful", 0.75),
        ("win", 0.8), ("wins", 0.8), ("boost", 0.4), ("growth", 0.3),
        ("improve", 0.4), ("improved", 0.4), ("improvement", 0.4), ("progress", 0.3),
        ("benefit", 0.3), ("benefits", 0.3), ("happy", 0.8), ("hope", 0.3),
        ("hopeful", 0.5), ("safe", 0.5), ("strong", 0.43), ("approved", 0.4),
        ("welcome", 0.8), ("support", 0.2), ("modern", 0.2), ("new", 0.14),
        ("clean", 0.37), ("affordable", 0.5), ("record", 0.2), ("historic", 0.3),
        ("wonderful", 1.0), ("amazing", 0.6), ("remarkable", 0.75), ("optimistic", 0.5),
        ("bad", -0.7), ("worse", -0.4), ("worst", -1.0), ("poor", -0.4),
        ("terrible", -1.0), ("awful", -1.0), ("horrible", -1.0), ("negative", -0.3),
        ("fail", -0.5), ("failed", -0.5), ("failure", -0.32), ("loss", -0.4),
        ("crisis", -0.5), ("fear", -0.5), ("fears", -0.5), ("concern", -0.3),
        ("concerns", -0.3), ("protest", -0.3), ("protests", -0.3), ("angry", -0.5),
        ("illegal", -0.5), ("corrupt", -0.5), ("scam", -0.6), ("delay", -0.3),
        ("delayed", -0.3), ("unsafe", -0.5), ("dangerous", -0.6), ("death", -0.5),
        ("dead", -0.2), ("killed", -0.2), ("violence", -0.6), ("slum", -0.3),
        ("evicted", -0.5), ("eviction", -0.5), ("crash", -0.6), ("decline", -0.3),
        ("sad", -0.5), ("wrong", -0.5), ("difficult", -0.5), ("risk", -0.3),
    ]
    .into_iter()
    .collect();

    static ref INTENSIFIERS: HashMap<&'static str, f64> = [
        ("very", 1.3), ("really", 1.2), ("extremely", 1.5), ("highly", 1.3),
        ("so", 1.2), ("too", 1.2), ("most", 1.3), ("deeply", 1.4),
    ]
    .into_iter()
    .collect();
}

#[derive(Default)]
pub struct LexiconScorer;

impl fmt::Debug for LexiconScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconScorer")
            .field("words", &POLARITY.len())
            .finish()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

fn is_negation(word: &str) -> bool {
    matches!(word, "not" | "no" | "never" | "without") || word.ends_with("n't")
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase().replace('’', "'"))
}

impl PolarityScorer for LexiconScorer {
    fn name(&self) -> &str {
        "Lexicon"
    }

    fn score(&self, text: &str) -> f64 {
        let mut total = 0.0;
        let mut hits = 0usize;
        let mut modifier = 1.0;

        for word in tokens(text) {
            if let Some(polarity) = POLARITY.get(word.as_str()) {
                total += polarity * modifier;
                hits += 1;
                modifier = 1.0;
            } else if is_negation(&word) {
                modifier *= NEGATION_FACTOR;
            } else if let Some(factor) = INTENSIFIERS.get(word.as_str()) {
                modifier *= factor;
            } else {
                modifier = 1.0;
            }
        }

        if hits == 0 {
            return 0.0;
        }
        (total / hits as f64).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_neutral_text() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score(""), 0.0);
        assert_eq!(scorer.score("The committee met on Tuesday."), 0.0);
    }

    #[test]
    fn test_polarity_sign() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("A good day for the city") > 0.0);
        assert!(scorer.score("A bad day for the city") < 0.0);
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        let scorer = LexiconScorer::new();
        assert!((scorer.score("not good") - (-0.35)).abs() < 1e-9);
        assert!(scorer.score("The project isn't bad") > 0.0);
        assert_eq!(scorer.score("isn’t bad"), scorer.score("isn't bad"));
    }

    #[test]
    fn test_intensifier_scales() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("very good") > scorer.score("good"));
        // clamped to the polarity range
        assert_eq!(scorer.score("extremely excellent"), 1.0);
    }

    #[test]
    fn test_mean_of_contributions() {
        let scorer = LexiconScorer::new();
        // (0.7 + -0.7) / 2
        assert_eq!(scorer.score("Good plan, bad execution"), 0.0);
    }

    #[test]
    fn test_case_and_punctuation() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("GREAT!!!"), scorer.score("great"));
    }
}
