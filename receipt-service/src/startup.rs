//! Application startup and lifecycle management.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::error::AppError;
use crate::handlers;
use crate::middleware::{make_request_span, metrics_middleware, request_id_middleware};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route("/process", post(handlers::receipts::process_receipt))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        // Outermost, so the trace span already sees the request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and build the router. Port 0 picks a free port.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let addr: SocketAddr = address.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Invalid listen address {}: {}", address, e))
        })?;

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::InternalError(e.into())
        })?;
        let port = listener
            .local_addr()
            .map_err(|e| AppError::InternalError(e.into()))?
            .port();

        tracing::info!(
            vendor = %settings.vendor.base_url,
            "Receipt service: HTTP on port {}",
            port
        );

        let state = AppState::new(settings)?;

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await.map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            e
        })
    }
}
