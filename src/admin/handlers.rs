use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::inference::ServiceStatus;
use crate::resilience::BreakerSnapshot;

#[derive(Serialize)]
pub struct AdminStatus {
    pub version: &'static str,
    pub service: ServiceStatus,
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub message: &'static str,
    pub circuit_breaker: BreakerSnapshot,
}

pub async fn get_status(State(state): State<AppState>) -> Json<AdminStatus> {
    Json(AdminStatus {
        version: env!("CARGO_PKG_VERSION"),
        service: state.client.get_service_status().await,
    })
}

pub async fn reset_circuit_breaker(State(state): State<AppState>) -> Json<ResetResponse> {
    let snapshot = state.client.reset_circuit_breaker();
    Json(ResetResponse {
        message: "circuit breaker reset",
        circuit_breaker: snapshot,
    })
}
