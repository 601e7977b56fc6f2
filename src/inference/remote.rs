//! HTTP client for the remote inference service.
//!
//! # Responsibilities
//! - POST single and batch predictions, GET the liveness endpoint
//! - Bound every call by a caller-supplied deadline
//! - Classify outcomes: only `200 OK` with a well-formed body is a success
//!
//! Knows nothing about the circuit breaker; `FailSafeClient` decides
//! whether to call it and what an error means.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::InferenceConfig;
use crate::inference::error::{RemoteError, SetupError};
use crate::inference::types::{Probabilities, Sentiment};
use crate::resilience::with_deadline;

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
    model: &'a str,
    include_probabilities: bool,
}

#[derive(Debug, Serialize)]
struct BatchPredictRequest<'a> {
    texts: &'a [String],
    model: &'a str,
    include_probabilities: bool,
}

/// Prediction as returned by the inference service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemotePrediction {
    /// Echoed input, when the service includes it.
    #[serde(default)]
    pub text: Option<String>,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub compound_score: f64,
    #[serde(default)]
    pub probabilities: Option<Probabilities>,
    #[serde(default)]
    pub processing_time_ms: Option<f64>,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl RemotePrediction {
    fn validate(&self) -> Result<(), RemoteError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(RemoteError::Malformed(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        if !(-1.0..=1.0).contains(&self.compound_score) {
            return Err(RemoteError::Malformed(format!(
                "compound_score {} outside [-1, 1]",
                self.compound_score
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteBatchSummary {
    #[serde(default)]
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteBatchResponse {
    pub results: Vec<RemotePrediction>,
    #[serde(default)]
    pub summary: RemoteBatchSummary,
}

/// Thin wrapper over `reqwest::Client` bound to one base URL.
#[derive(Debug, Clone)]
pub struct InferenceService {
    http: reqwest::Client,
    base_url: String,
}

impl InferenceService {
    pub fn new(config: &InferenceConfig) -> Result<Self, SetupError> {
        let url = Url::parse(&config.base_url).map_err(|source| SetupError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SetupError::UnsupportedScheme(url.scheme().to_string()));
        }

        // The inference service lives on the internal network; never route it through a proxy.
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .no_proxy()
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /predict`.
    pub async fn predict(
        &self,
        text: &str,
        model: &str,
        include_probabilities: bool,
        deadline: Duration,
    ) -> Result<RemotePrediction, RemoteError> {
        let body = PredictRequest {
            text,
            model,
            include_probabilities,
        };
        let prediction: RemotePrediction = self.post_json("/predict", &body, deadline).await?;
        prediction.validate()?;
        Ok(prediction)
    }

    /// `POST /predict/batch`. The response must account for every input:
    /// `results.len() + summary.failed == texts.len()`. When items failed,
    /// each result must echo its text so it can be matched to an input.
    pub async fn predict_batch(
        &self,
        texts: &[String],
        model: &str,
        include_probabilities: bool,
        deadline: Duration,
    ) -> Result<RemoteBatchResponse, RemoteError> {
        let body = BatchPredictRequest {
            texts,
            model,
            include_probabilities,
        };
        let response: RemoteBatchResponse = self.post_json("/predict/batch", &body, deadline).await?;

        let accounted = response.results.len() + response.summary.failed;
        if accounted != texts.len() {
            return Err(RemoteError::Malformed(format!(
                "batch response covers {} of {} texts",
                accounted,
                texts.len()
            )));
        }
        if response.summary.failed > 0 && response.results.iter().any(|r| r.text.is_none()) {
            return Err(RemoteError::Malformed(format!(
                "batch reports {} failed texts but does not echo which texts succeeded",
                response.summary.failed
            )));
        }
        for prediction in &response.results {
            prediction.validate()?;
        }
        Ok(response)
    }

    /// `GET /health`. Returns the payload if it is JSON.
    pub async fn health(&self, deadline: Duration) -> Result<Option<serde_json::Value>, RemoteError> {
        let url = self.endpoint("/health");
        let exchange = async {
            let response = self.http.get(&url).send().await.map_err(RemoteError::Transport)?;
            let body = Self::require_ok(response)?
                .bytes()
                .await
                .map_err(RemoteError::Transport)?;
            Ok::<_, RemoteError>(serde_json::from_slice(&body).ok())
        };
        with_deadline(deadline, exchange).await?
    }

    async fn post_json<B, R>(&self, path: &str, body: &B, deadline: Duration) -> Result<R, RemoteError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let exchange = async {
            let response = self
                .http
                .post(&url)
                .json(body)
                .send()
                .await
                .map_err(RemoteError::Transport)?;
            let bytes = Self::require_ok(response)?
                .bytes()
                .await
                .map_err(RemoteError::Transport)?;
            serde_json::from_slice::<R>(&bytes).map_err(|e| RemoteError::Malformed(e.to_string()))
        };
        with_deadline(deadline, exchange).await?
    }

    fn require_ok(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        match response.status() {
            StatusCode::OK => Ok(response),
            status => Err(RemoteError::Status(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_base_url() {
        let config = InferenceConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(
            InferenceService::new(&config),
            Err(SetupError::InvalidBaseUrl { .. })
        ));

        let config = InferenceConfig {
            base_url: "ftp://models.internal".into(),
            ..Default::default()
        };
        assert!(matches!(
            InferenceService::new(&config),
            Err(SetupError::UnsupportedScheme(s)) if s == "ftp"
        ));
    }

    #[test]
    fn test_endpoints_ignore_trailing_slash() {
        let config = InferenceConfig {
            base_url: "http://ml-service:8001/".into(),
            ..Default::default()
        };
        let service = InferenceService::new(&config).unwrap();
        assert_eq!(service.endpoint("/predict"), "http://ml-service:8001/predict");
    }

    #[test]
    fn test_remote_prediction_wire_shape() {
        let prediction: RemotePrediction = serde_json::from_str(
            r#"{"sentiment":"negative","confidence":0.91,"compound_score":-0.72,
                "probabilities":{"positive":0.02,"neutral":0.07,"negative":0.91},
                "model_name":"roberta","extra":"ignored"}"#,
        )
        .unwrap();
        assert_eq!(prediction.sentiment, Sentiment::Negative);
        assert_eq!(prediction.model_name.as_deref(), Some("roberta"));
        assert!(prediction.validate().is_ok());

        let out_of_range = RemotePrediction {
            confidence: 1.4,
            ..prediction
        };
        assert!(matches!(out_of_range.validate(), Err(RemoteError::Malformed(_))));
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let parsed = serde_json::from_str::<RemotePrediction>(
            r#"{"sentiment":"mixed","confidence":0.5,"compound_score":0.0}"#,
        );
        assert!(parsed.is_err());
    }
}
