//! Shared utilities for integration tests: a programmable mock inference
//! service and helpers for building clients against it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use sentiment_failsafe::config::ServiceConfig;

/// What the mock answers on every route.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Well-formed 200 responses.
    Ok,
    /// Sleep, then answer like `Ok`.
    Delay(Duration),
    /// Answer with this status and a JSON error body.
    Status(u16),
    /// 200 with this exact body.
    Raw(&'static str),
}

#[derive(Clone)]
struct MockState {
    behavior: Arc<Mutex<Behavior>>,
    hits: Arc<AtomicUsize>,
}

/// Mock inference service bound to an ephemeral port.
pub struct MockInference {
    pub addr: SocketAddr,
    state: MockState,
}

impl MockInference {
    pub async fn start(behavior: Behavior) -> Self {
        let state = MockState {
            behavior: Arc::new(Mutex::new(behavior)),
            hits: Arc::new(AtomicUsize::new(0)),
        };
        let app = Router::new()
            .route("/predict", post(predict))
            .route("/predict/batch", post(predict_batch))
            .route("/health", get(health))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set(&self, behavior: Behavior) {
        *self.state.behavior.lock().unwrap() = behavior;
    }

    /// Requests received on the prediction routes.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

fn remote_prediction(text: &str) -> Value {
    let (sentiment, compound) = if text.contains("hate") {
        ("negative", -0.81)
    } else {
        ("positive", 0.86)
    };
    json!({
        "text": text,
        "sentiment": sentiment,
        "confidence": 0.9374,
        "compound_score": compound,
        "probabilities": {"positive": 0.9, "neutral": 0.06, "negative": 0.04},
        "processing_time_ms": 41.2,
        "model_name": "mock-roberta",
    })
}

async fn respond(state: &MockState, ok: impl FnOnce() -> Value) -> Response {
    let behavior = state.behavior.lock().unwrap().clone();
    match behavior {
        Behavior::Ok => Json(ok()).into_response(),
        Behavior::Delay(delay) => {
            tokio::time::sleep(delay).await;
            Json(ok()).into_response()
        }
        Behavior::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap();
            (status, Json(json!({"detail": "mock failure"}))).into_response()
        }
        Behavior::Raw(body) => (StatusCode::OK, body).into_response(),
    }
}

async fn predict(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let text = body["text"].as_str().unwrap_or_default().to_string();
    respond(&state, || remote_prediction(&text)).await
}

async fn predict_batch(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let texts: Vec<String> = body["texts"]
        .as_array()
        .map(|a| a.iter().filter_map(|t| t.as_str().map(String::from)).collect())
        .unwrap_or_default();
    respond(&state, || {
        let results: Vec<Value> = texts.iter().map(|t| remote_prediction(t)).collect();
        json!({
            "results": results,
            "summary": {"total": texts.len(), "successful": texts.len(), "failed": 0},
        })
    })
    .await
}

async fn health(State(state): State<MockState>) -> Response {
    respond(&state, || json!({"status": "healthy", "model_loaded": true})).await
}

/// An address with nothing listening on it.
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Defaults pointed at `base_url`, with the probe cache disabled.
pub fn config_for(base_url: &str) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.inference.base_url = base_url.to_string();
    config.inference.request_timeout_ms = 2_000;
    config.inference.health_timeout_ms = 1_000;
    config.inference.health_cache_ms = 0;
    config
}
