//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::PaymentQueryService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Query service for all report endpoints.
    pub query_service: Arc<PaymentQueryService>,
}
