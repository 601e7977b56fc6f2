//! Constant scorer used when no lexicon is available.

use crate::inference::types::{Probabilities, Provenance, Sentiment};
use crate::scoring::{Assessment, ScorerError, SentimentScorer};

/// Latency reported for minimal results; scoring itself is free.
pub const MINIMAL_LATENCY_MS: f64 = 1.0;

/// Always answers neutral with low confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalScorer;

impl MinimalScorer {
    pub const NAME: &'static str = "minimal";

    pub fn assessment(&self) -> Assessment {
        Assessment {
            sentiment: Sentiment::Neutral,
            confidence: 0.5,
            compound: 0.0,
            probabilities: Probabilities {
                positive: 0.33,
                neutral: 0.34,
                negative: 0.33,
            },
        }
    }
}

impl SentimentScorer for MinimalScorer {
    fn assess(&self, _text: &str) -> Result<Assessment, ScorerError> {
        Ok(self.assessment())
    }

    fn provenance(&self) -> Provenance {
        Provenance::FallbackMinimal
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_input() {
        let scorer = MinimalScorer;
        let a = scorer.assess("I love this").unwrap();
        let b = scorer.assess("I hate this").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.sentiment, Sentiment::Neutral);
        assert_eq!(a.confidence, 0.5);
        assert_eq!(a.compound, 0.0);
        assert!((a.probabilities.total() - 1.0).abs() < 1e-9);
        assert_eq!(scorer.provenance(), Provenance::FallbackMinimal);
    }
}
