//! Fallback engine: local scoring in the client's result shape.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::config::{FallbackConfig, ScorerKind};
use crate::inference::types::{
    display_text, duration_ms, BatchBuilder, BatchResult, PredictionResult, Provenance,
};
use crate::observability::metrics;
use crate::resilience::HealthState;
use crate::scoring::minimal::MINIMAL_LATENCY_MS;
use crate::scoring::{Assessment, LexiconScorer, MinimalScorer, SentimentScorer};

/// Scores texts locally. Never fails: a scorer error degrades to the
/// minimal answer.
#[derive(Clone)]
pub struct FallbackEngine {
    scorer: Arc<dyn SentimentScorer>,
    minimal: MinimalScorer,
    display_chars: usize,
}

impl FallbackEngine {
    pub fn new(scorer: Arc<dyn SentimentScorer>, display_chars: usize) -> Self {
        Self {
            scorer,
            minimal: MinimalScorer,
            display_chars,
        }
    }

    /// Select the scorer once from configuration.
    ///
    /// A lexicon file that cannot be loaded leaves the engine on the minimal
    /// scorer; the gateway still starts.
    pub fn from_config(config: &FallbackConfig, display_chars: usize) -> Self {
        let scorer: Arc<dyn SentimentScorer> = match (config.scorer, &config.lexicon_path) {
            (ScorerKind::Minimal, _) => Arc::new(MinimalScorer),
            (ScorerKind::Lexicon, None) => {
                Arc::new(LexiconScorer::builtin().with_max_tokens(config.max_tokens))
            }
            (ScorerKind::Lexicon, Some(path)) => match LexiconScorer::from_file(path) {
                Ok(lexicon) => {
                    tracing::info!(path = %path.display(), entries = lexicon.len(), "Lexicon loaded");
                    Arc::new(lexicon.with_max_tokens(config.max_tokens))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Lexicon unavailable, falling back to minimal scorer");
                    Arc::new(MinimalScorer)
                }
            },
        };
        tracing::info!(scorer = scorer.name(), "Fallback engine ready");
        Self::new(scorer, display_chars)
    }

    /// Whether a real lexicon backs this engine.
    pub fn lexicon_available(&self) -> bool {
        self.scorer.provenance() == Provenance::FallbackLexicon
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    pub fn provenance(&self) -> Provenance {
        self.scorer.provenance()
    }

    /// Score one text.
    pub fn score(
        &self,
        text: &str,
        include_probabilities: bool,
        reason: &str,
        state: HealthState,
    ) -> PredictionResult {
        let started = Instant::now();
        let (assessment, provenance, model_name) = self.assess(text);
        let elapsed = started.elapsed();
        metrics::record_prediction(provenance, elapsed);

        let processing_time_ms = match provenance {
            Provenance::FallbackMinimal => MINIMAL_LATENCY_MS,
            _ => duration_ms(elapsed),
        };
        PredictionResult {
            text: display_text(text, self.display_chars),
            sentiment: assessment.sentiment,
            confidence: assessment.confidence,
            compound_score: assessment.compound,
            probabilities: include_probabilities.then_some(assessment.probabilities),
            processing_time_ms,
            provenance,
            model_name: model_name.to_string(),
            service_state: state,
            fallback_reason: Some(reason.to_string()),
            timestamp: Utc::now(),
        }
    }

    /// Score every text in order. The summary reports `failed = 0`: local
    /// scoring has no failure mode.
    pub fn score_batch(
        &self,
        texts: &[String],
        include_probabilities: bool,
        reason: &str,
        state: HealthState,
    ) -> BatchResult {
        let started = Instant::now();
        let mut builder = BatchBuilder::new(texts.len());
        let mut method = self.scorer.provenance();

        for text in texts {
            let result = self.score(text, include_probabilities, reason, state);
            if result.provenance == Provenance::FallbackMinimal {
                method = Provenance::FallbackMinimal;
            }
            builder.push(result);
        }

        metrics::record_batch(method, texts.len());
        builder.finish(method, 0, started.elapsed(), Some(reason.to_string()))
    }

    fn assess(&self, text: &str) -> (Assessment, Provenance, &'static str) {
        match self.scorer.assess(text) {
            Ok(assessment) => (assessment, self.scorer.provenance(), self.scorer.name()),
            Err(e) => {
                tracing::warn!(error = %e, scorer = self.scorer.name(), "Scorer failed, using minimal fallback");
                (self.minimal.assessment(), Provenance::FallbackMinimal, MinimalScorer::NAME)
            }
        }
    }
}

impl std::fmt::Debug for FallbackEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackEngine")
            .field("scorer", &self.scorer.name())
            .field("display_chars", &self.display_chars)
            .finish()
    }
}
