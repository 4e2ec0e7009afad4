//! Aggregate report DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// A monetary aggregate for one calendar month.
#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyAmountResponse {
    /// Month the amount was computed for (`YYYY-MM`).
    pub year_month: String,
    /// Exact decimal amount as a string.
    pub amount: String,
}

/// Distinct product names.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    /// Product names, alphabetically.
    pub data: Vec<String>,
    /// Number of names returned.
    pub total: usize,
}
