//! payment-reports server entry point.
//!
//! Starts the Axum HTTP server with the read-only report endpoints.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use payment_reports::api;
use payment_reports::app_state::AppState;
use payment_reports::config::ReportConfig;
use payment_reports::service::PaymentQueryService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ReportConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        payments_file = ?config.payments_file,
        clock_offset = %config.clock_offset,
        clock_fixed_at = ?config.clock_fixed_at,
        "starting payment-reports"
    );

    // Build service layer
    let query_service = Arc::new(PaymentQueryService::new(
        config.payment_source(),
        config.clock(),
    ));

    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { query_service });

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
