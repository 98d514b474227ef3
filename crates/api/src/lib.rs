//! HTTP ingestion endpoint for telemetry events.
//!
//! Accepts events over HTTP, validates them, appends them to a
//! newline-delimited JSON log, and answers health probes. Structured
//! logging via tracing and Prometheus metrics are wired in here.

pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use event_log::EventLog;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::telemetry::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<L: EventLog + 'static>(
    state: Arc<AppState<L>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/telemetry", post(routes::telemetry::receive::<L>))
        .route("/api/test", post(routes::echo::echo))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state backed by `log`.
pub fn create_state<L: EventLog + 'static>(log: L) -> Arc<AppState<L>> {
    Arc::new(AppState::new(log))
}
