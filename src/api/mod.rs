//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All report endpoints are read-only and mounted under `/api/v1`.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for every report endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        handlers::payments::sorted_by_date,
        handlers::payments::sorted_by_item_count,
        handlers::payments::for_current_month,
        handlers::payments::for_month,
        handlers::payments::for_last_days,
        handlers::payments::with_single_item,
        handlers::payments::with_value_over,
        handlers::reports::sales_total,
        handlers::reports::discount_total,
        handlers::reports::products_current_month,
        handlers::reports::user_payment_items,
        handlers::system::health_handler,
    ),
    components(schemas(
        dto::SortOrder,
        dto::PaymentItemDto,
        dto::PaymentDto,
        dto::PaymentListResponse,
        dto::PaymentItemListResponse,
        dto::MonthlyAmountResponse,
        dto::ProductListResponse,
        handlers::system::HealthResponse,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "Payments", description = "Payment lists"),
        (name = "Reports", description = "Aggregates over payments"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());
    with_docs(router)
}

#[cfg(feature = "swagger-ui")]
fn with_docs(router: Router<AppState>) -> Router<AppState> {
    router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}

#[cfg(not(feature = "swagger-ui"))]
fn with_docs(router: Router<AppState>) -> Router<AppState> {
    router
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::DateTime;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::{FixedClock, InMemoryPaymentSource, Payment, PaymentItem, User};
    use crate::service::PaymentQueryService;

    fn payment(at: &str, email: &str, items: Vec<PaymentItem>) -> Payment {
        let Ok(paid_at) = DateTime::parse_from_rfc3339(at) else {
            panic!("valid timestamp: {at}");
        };
        Payment::new(paid_at, User::new(email), items)
    }

    fn item(name: &str, regular: i64, final_price: i64, discount: i64) -> PaymentItem {
        PaymentItem::new(
            name,
            Decimal::new(regular, 2),
            Decimal::new(final_price, 2),
            Decimal::new(discount, 2),
        )
    }

    fn app() -> Router {
        let payments = vec![
            payment(
                "2023-01-15T10:00:00+00:00",
                "anna@example.com",
                vec![item("Keyboard", 1000, 1000, 0), item("Mouse", 2500, 2000, 500)],
            ),
            payment(
                "2023-02-10T12:00:00+00:00",
                "bob@example.com",
                vec![item("Desk", 6000, 5000, 1000)],
            ),
        ];
        let Ok(now) = DateTime::parse_from_rfc3339("2023-02-20T00:00:00+00:00") else {
            panic!("valid timestamp");
        };
        let service = PaymentQueryService::new(
            Arc::new(InMemoryPaymentSource::new(payments)),
            Arc::new(FixedClock::new(now)),
        );
        build_router().with_state(AppState {
            query_service: Arc::new(service),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("valid request");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("router is infallible");
        };
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("readable body");
        };
        let Ok(json) = serde_json::from_slice(&bytes) else {
            panic!("json body for {uri}");
        };
        (status, json)
    }

    #[tokio::test]
    async fn sales_total_is_exact_string() {
        let (status, body) = get_json("/api/v1/reports/2023-01/sales-total").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["year_month"], "2023-01");
        assert_eq!(body["amount"], "30.00");
    }

    #[tokio::test]
    async fn discount_total_for_month() {
        let (status, body) = get_json("/api/v1/reports/2023-01/discount-total").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["amount"], "5.00");
    }

    #[tokio::test]
    async fn malformed_month_is_bad_request() {
        let (status, body) = get_json("/api/v1/reports/2023-13/sales-total").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1002);
    }

    #[tokio::test]
    async fn sorted_by_date_desc() {
        let (status, body) = get_json("/api/v1/payments/sorted/date?order=desc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["data"][0]["user_email"], "bob@example.com");
        assert_eq!(body["data"][1]["user_email"], "anna@example.com");
    }

    #[tokio::test]
    async fn current_month_literal_route_wins() {
        let (status, body) = get_json("/api/v1/payments/month/current").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["items"][0]["name"], "Desk");
    }

    #[tokio::test]
    async fn value_over_threshold() {
        let (status, body) = get_json("/api/v1/payments/value-over/40").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["user_email"], "bob@example.com");
    }

    #[tokio::test]
    async fn single_item_payments() {
        let (status, body) = get_json("/api/v1/payments/single-item").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["user_email"], "bob@example.com");
        assert_eq!(body["data"][0]["item_count"], 1);
    }

    #[tokio::test]
    async fn payments_for_given_month() {
        let (status, body) = get_json("/api/v1/payments/month/2023-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["user_email"], "anna@example.com");
        assert_eq!(body["data"][0]["paid_at"], "2023-01-15T10:00:00+00:00");
    }

    #[tokio::test]
    async fn payments_for_last_days() {
        let (status, body) = get_json("/api/v1/payments/last-days/15").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["user_email"], "bob@example.com");
    }

    #[tokio::test]
    async fn malformed_day_count_is_bad_request() {
        let (status, body) = get_json("/api/v1/payments/last-days/soon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);
    }

    #[tokio::test]
    async fn user_items_and_products() {
        let (status, body) = get_json("/api/v1/users/anna@example.com/payment-items").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["data"][1]["discount"], "5.00");

        let (status, body) = get_json("/api/v1/products/current-month").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], serde_json::json!(["Desk"]));
    }

    #[tokio::test]
    async fn health_reports_clock() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report_time"], "2023-02-20T00:00:00+00:00");
    }
}
