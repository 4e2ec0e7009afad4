//! Aggregate report handlers: monthly totals, products, and per-user items.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    MonthlyAmountResponse, PaymentItemDto, PaymentItemListResponse, ProductListResponse,
};
use crate::app_state::AppState;
use crate::domain::YearMonth;
use crate::error::{ErrorResponse, ReportError};

/// `GET /reports/:year_month/sales-total` — Sum of final prices in a month.
///
/// # Errors
///
/// Returns [`ReportError::InvalidYearMonth`] on a malformed month.
#[utoipa::path(
    get,
    path = "/api/v1/reports/{year_month}/sales-total",
    tag = "Reports",
    summary = "Total sales for a month",
    params(
        ("year_month" = String, Path, description = "Calendar month, `YYYY-MM`"),
    ),
    responses(
        (status = 200, description = "Exact sales total", body = MonthlyAmountResponse),
        (status = 400, description = "Malformed month", body = ErrorResponse),
    )
)]
pub async fn sales_total(
    State(state): State<AppState>,
    Path(year_month): Path<String>,
) -> Result<impl IntoResponse, ReportError> {
    let year_month: YearMonth = year_month.parse()?;
    let amount = state.query_service.sum_total_for_month(year_month)?;
    Ok(Json(MonthlyAmountResponse {
        year_month: year_month.to_string(),
        amount: amount.to_string(),
    }))
}

/// `GET /reports/:year_month/discount-total` — Sum of discounts granted in
/// the month of year.
///
/// # Errors
///
/// Returns [`ReportError::InvalidYearMonth`] on a malformed month.
#[utoipa::path(
    get,
    path = "/api/v1/reports/{year_month}/discount-total",
    tag = "Reports",
    summary = "Total discount for a month",
    description = "Compares only the month of year; the same month in other years is included.",
    params(
        ("year_month" = String, Path, description = "Calendar month, `YYYY-MM`"),
    ),
    responses(
        (status = 200, description = "Exact discount total", body = MonthlyAmountResponse),
        (status = 400, description = "Malformed month", body = ErrorResponse),
    )
)]
pub async fn discount_total(
    State(state): State<AppState>,
    Path(year_month): Path<String>,
) -> Result<impl IntoResponse, ReportError> {
    let year_month: YearMonth = year_month.parse()?;
    let amount = state.query_service.sum_discount_for_month(year_month)?;
    Ok(Json(MonthlyAmountResponse {
        year_month: year_month.to_string(),
        amount: amount.to_string(),
    }))
}

/// `GET /products/current-month` — Distinct product names sold this month.
///
/// # Errors
///
/// Returns [`ReportError`] if the clock or payment source fails.
#[utoipa::path(
    get,
    path = "/api/v1/products/current-month",
    tag = "Reports",
    summary = "Products sold in the current month",
    responses(
        (status = 200, description = "Product names", body = ProductListResponse),
        (status = 503, description = "Collaborator unavailable", body = ErrorResponse),
    )
)]
pub async fn products_current_month(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ReportError> {
    let names = state.query_service.products_sold_in_current_month()?;
    let total = names.len();
    Ok(Json(ProductListResponse {
        data: names.into_iter().collect(),
        total,
    }))
}

/// `GET /users/:email/payment-items` — Line items bought by one user.
///
/// # Errors
///
/// Returns [`ReportError`] if the payment source fails.
#[utoipa::path(
    get,
    path = "/api/v1/users/{email}/payment-items",
    tag = "Reports",
    summary = "Payment items for a user",
    description = "Email comparison is exact and case-sensitive.",
    params(
        ("email" = String, Path, description = "Purchaser email"),
    ),
    responses(
        (status = 200, description = "Line items", body = PaymentItemListResponse),
        (status = 503, description = "Payment source unavailable", body = ErrorResponse),
    )
)]
pub async fn user_payment_items(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ReportError> {
    let items = state.query_service.payment_items_for_user_email(&email)?;
    let data: Vec<PaymentItemDto> = items.iter().map(PaymentItemDto::from).collect();
    Ok(Json(PaymentItemListResponse {
        email,
        total: data.len(),
        data,
    }))
}

/// Report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/{year_month}/sales-total", get(sales_total))
        .route("/reports/{year_month}/discount-total", get(discount_total))
        .route("/products/current-month", get(products_current_month))
        .route("/users/{email}/payment-items", get(user_payment_items))
}
