//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::EchoConfig;
use crate::health::HealthRegistry;
use crate::http::handlers;
use crate::http::request::{request_span, stamp_request_id};
use crate::observability::metrics;
use crate::simulate::DelaySimulator;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<HealthRegistry>,
    pub delay: DelaySimulator,
}

/// HTTP server for the echo simulator.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EchoConfig, registry: Arc<HealthRegistry>) -> Self {
        let state = AppState {
            registry,
            delay: DelaySimulator::new(config.delay.max_secs),
        };
        Self {
            router: build_router(&config, state),
        }
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &EchoConfig, state: AppState) -> Router {
    Router::new()
        .route("/get", get(handlers::echo))
        .route("/post", post(handlers::echo))
        .route("/put", put(handlers::echo))
        .route("/patch", patch(handlers::echo))
        .route("/delete", delete(handlers::echo))
        .route("/headers", get(handlers::headers))
        .route("/status/{code}", get(handlers::status))
        .route("/delay/{seconds}", get(handlers::delay))
        .route("/health", get(handlers::liveness))
        .route("/ready", get(handlers::readiness))
        .route_layer(middleware::from_fn(metrics::track_requests))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(middleware::from_fn(stamp_request_id))
}
