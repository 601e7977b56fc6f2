//! Sentiment route handlers. Each one validates the body shape, hands the
//! text to the fail-safe client and serializes what comes back.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::inference::{BatchResult, PredictionResult, ServiceStatus};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default = "default_include_probabilities")]
    pub include_probabilities: bool,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub texts: Vec<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default = "default_include_probabilities")]
    pub include_probabilities: bool,
}

fn default_include_probabilities() -> bool {
    true
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<PredictionResult>, ApiError> {
    let result = state
        .client
        .predict(
            &request.text,
            request.model_name.as_deref(),
            request.include_probabilities,
        )
        .await?;
    Ok(Json(result))
}

pub async fn analyze_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResult>, ApiError> {
    let batch = state
        .client
        .predict_batch(
            &request.texts,
            request.model_name.as_deref(),
            request.include_probabilities,
        )
        .await?;
    Ok(Json(batch))
}

pub async fn service_status(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(state.client.get_service_status().await)
}

/// Gateway liveness. Says nothing about the inference service.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
