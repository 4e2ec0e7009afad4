//! Payment list handlers: sorted views, month and day windows, filters.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{PaymentListResponse, SortOrder, SortParams};
use crate::app_state::AppState;
use crate::domain::YearMonth;
use crate::error::{ErrorResponse, ReportError};

/// `GET /payments/sorted/date` — Payments ordered by timestamp.
///
/// # Errors
///
/// Returns [`ReportError`] if the payment source fails.
#[utoipa::path(
    get,
    path = "/api/v1/payments/sorted/date",
    tag = "Payments",
    summary = "Payments sorted by date",
    description = "Returns every payment ordered by timestamp. Ties keep source order.",
    params(SortParams),
    responses(
        (status = 200, description = "Sorted payments", body = PaymentListResponse),
        (status = 503, description = "Payment source unavailable", body = ErrorResponse),
    )
)]
pub async fn sorted_by_date(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<impl IntoResponse, ReportError> {
    let service = &state.query_service;
    let payments = match params.order {
        SortOrder::Asc => service.payments_sorted_by_date_asc()?,
        SortOrder::Desc => service.payments_sorted_by_date_desc()?,
    };
    Ok(Json(PaymentListResponse::from_ordered(&payments)))
}

/// `GET /payments/sorted/item-count` — Payments ordered by line-item count.
///
/// # Errors
///
/// Returns [`ReportError`] if the payment source fails.
#[utoipa::path(
    get,
    path = "/api/v1/payments/sorted/item-count",
    tag = "Payments",
    summary = "Payments sorted by item count",
    description = "Returns every payment ordered by number of line items. Ties keep source order.",
    params(SortParams),
    responses(
        (status = 200, description = "Sorted payments", body = PaymentListResponse),
        (status = 503, description = "Payment source unavailable", body = ErrorResponse),
    )
)]
pub async fn sorted_by_item_count(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<impl IntoResponse, ReportError> {
    let service = &state.query_service;
    let payments = match params.order {
        SortOrder::Asc => service.payments_sorted_by_item_count_asc()?,
        SortOrder::Desc => service.payments_sorted_by_item_count_desc()?,
    };
    Ok(Json(PaymentListResponse::from_ordered(&payments)))
}

/// `GET /payments/month/current` — Payments in the current calendar month.
///
/// # Errors
///
/// Returns [`ReportError`] if the clock or payment source fails.
#[utoipa::path(
    get,
    path = "/api/v1/payments/month/current",
    tag = "Payments",
    summary = "Payments in the current month",
    responses(
        (status = 200, description = "Payments this month", body = PaymentListResponse),
        (status = 503, description = "Collaborator unavailable", body = ErrorResponse),
    )
)]
pub async fn for_current_month(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ReportError> {
    let payments = state.query_service.payments_for_current_month()?;
    Ok(Json(PaymentListResponse::from_ordered(&payments)))
}

/// `GET /payments/month/:year_month` — Payments in a given calendar month.
///
/// # Errors
///
/// Returns [`ReportError::InvalidYearMonth`] on a malformed month.
#[utoipa::path(
    get,
    path = "/api/v1/payments/month/{year_month}",
    tag = "Payments",
    summary = "Payments in a given month",
    description = "Matches calendar year and month of each payment's own timestamp.",
    params(
        ("year_month" = String, Path, description = "Calendar month, `YYYY-MM`"),
    ),
    responses(
        (status = 200, description = "Payments in the month", body = PaymentListResponse),
        (status = 400, description = "Malformed month", body = ErrorResponse),
    )
)]
pub async fn for_month(
    State(state): State<AppState>,
    Path(year_month): Path<String>,
) -> Result<impl IntoResponse, ReportError> {
    let year_month: YearMonth = year_month.parse()?;
    let payments = state.query_service.payments_for_month(year_month)?;
    Ok(Json(PaymentListResponse::from_ordered(&payments)))
}

/// `GET /payments/last-days/:days` — Payments strictly after `now - days`.
///
/// # Errors
///
/// Returns [`ReportError::InvalidRequest`] if `days` is not an integer and
/// [`ReportError::DateOutOfRange`] if the cutoff overflows.
#[utoipa::path(
    get,
    path = "/api/v1/payments/last-days/{days}",
    tag = "Payments",
    summary = "Payments in the last N days",
    params(
        ("days" = i64, Path, description = "Day count; negative values are not clamped"),
    ),
    responses(
        (status = 200, description = "Recent payments", body = PaymentListResponse),
        (status = 400, description = "Malformed day count", body = ErrorResponse),
        (status = 422, description = "Cutoff out of range", body = ErrorResponse),
    )
)]
pub async fn for_last_days(
    State(state): State<AppState>,
    Path(days): Path<String>,
) -> Result<impl IntoResponse, ReportError> {
    let days: i64 = days
        .parse()
        .map_err(|_| ReportError::InvalidRequest(format!("invalid day count: {days}")))?;
    let payments = state.query_service.payments_for_last_days(days)?;
    Ok(Json(PaymentListResponse::from_ordered(&payments)))
}

/// `GET /payments/single-item` — Distinct payments with exactly one item.
///
/// # Errors
///
/// Returns [`ReportError`] if the payment source fails.
#[utoipa::path(
    get,
    path = "/api/v1/payments/single-item",
    tag = "Payments",
    summary = "Payments with one item",
    responses(
        (status = 200, description = "Single-item payments", body = PaymentListResponse),
        (status = 503, description = "Payment source unavailable", body = ErrorResponse),
    )
)]
pub async fn with_single_item(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ReportError> {
    let payments = state.query_service.payments_with_single_item()?;
    Ok(Json(PaymentListResponse::from_set(payments)))
}

/// `GET /payments/value-over/:threshold` — Payments whose regular-price
/// total exceeds `threshold`.
///
/// # Errors
///
/// Returns [`ReportError::InvalidRequest`] if `threshold` is not an `i32`
/// and [`ReportError::PaymentValueNotExact`] if any payment total is not
/// an exact integer.
#[utoipa::path(
    get,
    path = "/api/v1/payments/value-over/{threshold}",
    tag = "Payments",
    summary = "Payments over a value threshold",
    params(
        ("threshold" = i32, Path, description = "Exclusive lower bound on the regular-price total"),
    ),
    responses(
        (status = 200, description = "Matching payments", body = PaymentListResponse),
        (status = 400, description = "Malformed threshold", body = ErrorResponse),
        (status = 422, description = "A payment total is not an exact integer", body = ErrorResponse),
    )
)]
pub async fn with_value_over(
    State(state): State<AppState>,
    Path(threshold): Path<String>,
) -> Result<impl IntoResponse, ReportError> {
    let threshold: i32 = threshold
        .parse()
        .map_err(|_| ReportError::InvalidRequest(format!("invalid threshold: {threshold}")))?;
    let payments = state.query_service.payments_with_value_over(threshold)?;
    Ok(Json(PaymentListResponse::from_set(payments)))
}

/// Payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments/sorted/date", get(sorted_by_date))
        .route("/payments/sorted/item-count", get(sorted_by_item_count))
        .route("/payments/month/current", get(for_current_month))
        .route("/payments/month/{year_month}", get(for_month))
        .route("/payments/last-days/{days}", get(for_last_days))
        .route("/payments/single-item", get(with_single_item))
        .route("/payments/value-over/{threshold}", get(with_value_over))
}
