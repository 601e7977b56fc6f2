//! Result shapes shared by the remote and fallback paths.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resilience::HealthState;

/// Sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Compound score at or above which a text is positive.
    pub const POSITIVE_THRESHOLD: f64 = 0.05;
    /// Compound score at or below which a text is negative.
    pub const NEGATIVE_THRESHOLD: f64 = -0.05;

    pub fn from_compound(compound: f64) -> Self {
        if compound >= Self::POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if compound <= Self::NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// Where a prediction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    RemoteService,
    FallbackLexicon,
    FallbackMinimal,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::RemoteService => "remote-service",
            Provenance::FallbackLexicon => "fallback-lexicon",
            Provenance::FallbackMinimal => "fallback-minimal",
        }
    }

    pub fn is_fallback(&self) -> bool {
        !matches!(self, Provenance::RemoteService)
    }
}

/// Per-label probabilities, summing to roughly 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl Probabilities {
    pub fn rounded(&self) -> Self {
        Self {
            positive: round3(self.positive),
            neutral: round3(self.neutral),
            negative: round3(self.negative),
        }
    }

    pub fn total(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }
}

/// Sentiment for one text. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Input text, truncated for display.
    pub text: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub compound_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Probabilities>,
    pub processing_time_ms: f64,
    pub provenance: Provenance,
    /// Model that produced the score (remote model or local scorer name).
    pub model_name: String,
    /// Breaker state when the result was produced.
    pub service_state: HealthState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Label counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn add(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub sentiment_distribution: SentimentDistribution,
    pub total_processing_time_ms: f64,
    pub average_processing_time_ms: f64,
    pub method: Provenance,
}

/// Ordered results for a batch plus its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_id: Uuid,
    pub results: Vec<PredictionResult>,
    pub summary: BatchSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Accumulates batch results in input order. Nothing is visible to callers
/// until `finish` builds the whole `BatchResult`.
#[derive(Debug)]
pub(crate) struct BatchBuilder {
    total: usize,
    results: Vec<PredictionResult>,
    distribution: SentimentDistribution,
}

impl BatchBuilder {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            results: Vec::with_capacity(total),
            distribution: SentimentDistribution::default(),
        }
    }

    pub(crate) fn push(&mut self, result: PredictionResult) {
        self.distribution.add(result.sentiment);
        self.results.push(result);
    }

    pub(crate) fn finish(
        self,
        method: Provenance,
        failed: usize,
        elapsed: Duration,
        fallback_reason: Option<String>,
    ) -> BatchResult {
        let successful = self.results.len();
        let total_ms = duration_ms(elapsed);
        let average_ms = if successful == 0 {
            0.0
        } else {
            round2(total_ms / successful as f64)
        };

        BatchResult {
            batch_id: Uuid::new_v4(),
            results: self.results,
            summary: BatchSummary {
                total: self.total,
                successful,
                failed,
                sentiment_distribution: self.distribution,
                total_processing_time_ms: total_ms,
                average_processing_time_ms: average_ms,
                method,
            },
            fallback_reason,
        }
    }
}

/// Round a score field to 3 decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Round a latency field to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn duration_ms(elapsed: Duration) -> f64 {
    round2(elapsed.as_secs_f64() * 1000.0)
}

/// Truncate `text` to `max_chars` characters, marking the cut with "...".
pub fn display_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_thresholds() {
        assert_eq!(Sentiment::from_compound(0.05), Sentiment::Positive);
        assert_eq!(Sentiment::from_compound(0.049), Sentiment::Neutral);
        assert_eq!(Sentiment::from_compound(-0.049), Sentiment::Neutral);
        assert_eq!(Sentiment::from_compound(-0.05), Sentiment::Negative);
    }

    #[test]
    fn test_display_text_truncates_on_char_boundary() {
        assert_eq!(display_text("short", 10), "short");
        assert_eq!(display_text("exactly", 7), "exactly");
        assert_eq!(display_text("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round3(0.66964), 0.67);
        assert_eq!(round3(-0.12345), -0.123);
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(duration_ms(Duration::from_micros(1_234)), 1.23);
    }

    #[test]
    fn test_provenance_wire_names() {
        let json = serde_json::to_string(&Provenance::FallbackLexicon).unwrap();
        assert_eq!(json, "\"fallback-lexicon\"");
        let parsed: Provenance = serde_json::from_str("\"remote-service\"").unwrap();
        assert_eq!(parsed, Provenance::RemoteService);
        assert_eq!(Provenance::FallbackMinimal.as_str(), "fallback-minimal");
    }

    #[test]
    fn test_batch_builder_summary() {
        let mut builder = BatchBuilder::new(3);
        for (text, sentiment) in [("a", Sentiment::Positive), ("b", Sentiment::Neutral), ("c", Sentiment::Positive)] {
            builder.push(PredictionResult {
                text: text.into(),
                sentiment,
                confidence: 0.8,
                compound_score: 0.5,
                probabilities: None,
                processing_time_ms: 1.0,
                provenance: Provenance::FallbackLexicon,
                model_name: "vader-lexicon".into(),
                service_state: HealthState::Failed,
                fallback_reason: None,
                timestamp: Utc::now(),
            });
        }

        let batch = builder.finish(Provenance::FallbackLexicon, 0, Duration::from_millis(9), None);
        let texts: Vec<_> = batch.results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(batch.summary.total, 3);
        assert_eq!(batch.summary.successful, 3);
        assert_eq!(batch.summary.failed, 0);
        assert_eq!(batch.summary.sentiment_distribution.positive, 2);
        assert_eq!(batch.summary.sentiment_distribution.neutral, 1);
        assert_eq!(batch.summary.total_processing_time_ms, 9.0);
        assert_eq!(batch.summary.average_processing_time_ms, 3.0);
    }
}
