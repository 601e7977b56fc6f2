//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with sentiment, status and admin handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a listener until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::ServiceConfig;
use crate::http::sentiment;
use crate::inference::FailSafeClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<FailSafeClient>,
    pub config: Arc<ServiceConfig>,
}

/// HTTP server for the sentiment gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: Arc<ServiceConfig>, client: Arc<FailSafeClient>) -> Self {
        let state = AppState { client, config };
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let timeout = Duration::from_secs(state.config.listener.request_timeout_secs);
        let admin_enabled = state.config.admin.enabled;

        let mut router = Router::new()
            .route("/health", get(sentiment::health))
            .route("/api/v1/sentiment/analyze", post(sentiment::analyze))
            .route("/api/v1/sentiment/batch", post(sentiment::analyze_batch))
            .route("/api/v1/sentiment/status", get(sentiment::service_status))
            .with_state(state.clone());

        if admin_enabled {
            router = router.merge(admin::setup_admin_router(state));
        } else {
            tracing::info!("Admin routes disabled");
        }

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(timeout)),
        )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
