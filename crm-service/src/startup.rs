//! Application startup and lifecycle management.

use crate::config::CrmConfig;
use crate::handlers;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::metrics::metrics_middleware;
use service_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CrmConfig>,
}

/// Build the HTTP router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        // Pipeline
        .route("/api/pipeline/stages", get(handlers::pipeline::list_stages))
        .route("/api/pipeline/board", post(handlers::pipeline::build_board))
        .route("/api/pipeline/move", post(handlers::pipeline::move_entity))
        // Invoices
        .route(
            "/api/invoices/totals",
            post(handlers::invoices::compute_invoice_totals),
        )
        .route(
            "/api/invoices/items",
            post(handlers::invoices::update_line_items),
        )
        .route(
            "/api/invoices/items/edit",
            post(handlers::invoices::edit_line_item),
        )
        .route(
            "/api/invoices/prepare",
            post(handlers::invoices::prepare_invoice_payload),
        )
        .route(
            "/api/invoices/summary",
            post(handlers::invoices::summarize_invoice_list),
        )
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: CrmConfig) -> Result<Self, AppError> {
        // Bind HTTP listener (port 0 = random port for testing)
        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!(
            http_port,
            default_tax_percentage = config.default_tax_percentage,
            "CRM service bound"
        );

        Ok(Self {
            http_port,
            http_listener,
            state: AppState {
                config: Arc::new(config),
            },
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = router(self.state);

        axum::serve(self.http_listener, router).await.map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
