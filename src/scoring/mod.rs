//! Local sentiment scorers.
//!
//! # Data Flow
//! ```text
//! text
//!     → SentimentScorer::assess
//!         lexicon.rs: rule-based polarity (builtin or file lexicon)
//!         minimal.rs: constant neutral answer
//!     → Assessment (label, confidence, compound, probabilities)
//! ```
//!
//! # Design Decisions
//! - Which scorer backs the fallback is chosen once, at construction
//! - Scorers are synchronous, CPU-only and shared read-only across requests

pub mod lexicon;
mod lexicon_data;
pub mod minimal;

use std::path::PathBuf;

use thiserror::Error;

use crate::inference::types::{round3, Probabilities, Provenance, Sentiment};

pub use lexicon::{LexiconScorer, PolarityScores};
pub use minimal::MinimalScorer;

/// Errors raised by a local scorer.
#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("text has {tokens} tokens, scorer accepts at most {max}")]
    InputTooLarge { tokens: usize, max: usize },

    #[error("failed to read lexicon {path}: {source}")]
    LexiconIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid lexicon entry on line {line}: {reason}")]
    LexiconParse { line: usize, reason: String },
}

/// A scorer's verdict on one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub compound: f64,
    pub probabilities: Probabilities,
}

impl Assessment {
    /// Label and confidence derived from a compound score.
    pub fn from_compound(compound: f64, probabilities: Probabilities) -> Self {
        let sentiment = Sentiment::from_compound(compound);
        let magnitude = compound.abs();
        let confidence = match sentiment {
            Sentiment::Positive | Sentiment::Negative => (0.7 + magnitude * 0.3).min(0.95),
            Sentiment::Neutral => 0.6 + 0.4 * (1.0 - magnitude),
        };
        Self {
            sentiment,
            confidence: round3(confidence),
            compound: round3(compound),
            probabilities: probabilities.rounded(),
        }
    }
}

/// A local, network-free sentiment scorer.
pub trait SentimentScorer: Send + Sync {
    fn assess(&self, text: &str) -> Result<Assessment, ScorerError>;

    /// Provenance tag for results from this scorer.
    fn provenance(&self) -> Provenance;

    /// Name reported as `model_name`.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probs() -> Probabilities {
        Probabilities {
            positive: 0.0,
            neutral: 1.0,
            negative: 0.0,
        }
    }

    #[test]
    fn test_polar_confidence_is_capped() {
        let strong = Assessment::from_compound(0.99, probs());
        assert_eq!(strong.sentiment, Sentiment::Positive);
        assert_eq!(strong.confidence, 0.95);

        let weak = Assessment::from_compound(-0.1, probs());
        assert_eq!(weak.sentiment, Sentiment::Negative);
        assert_eq!(weak.confidence, 0.73);
    }

    #[test]
    fn test_neutral_confidence() {
        let flat = Assessment::from_compound(0.0, probs());
        assert_eq!(flat.sentiment, Sentiment::Neutral);
        assert_eq!(flat.confidence, 1.0);

        let leaning = Assessment::from_compound(0.04, probs());
        assert_eq!(leaning.sentiment, Sentiment::Neutral);
        assert_eq!(leaning.confidence, 0.984);
    }
}
