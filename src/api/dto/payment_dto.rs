//! Payment DTOs for list endpoints.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Payment, PaymentItem};

/// Sort direction for the sorted payment endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

/// Query parameters for `GET /payments/sorted/*`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortParams {
    /// `asc` (default) or `desc`.
    #[serde(default)]
    pub order: SortOrder,
}

/// One line item. Amounts are decimal strings.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentItemDto {
    /// Product name.
    pub name: String,
    /// Price before discount.
    pub regular_price: String,
    /// Price charged.
    pub final_price: String,
    /// Discount granted.
    pub discount: String,
}

impl From<&PaymentItem> for PaymentItemDto {
    fn from(item: &PaymentItem) -> Self {
        Self {
            name: item.name().to_string(),
            regular_price: item.regular_price().to_string(),
            final_price: item.final_price().to_string(),
            discount: item.discount().to_string(),
        }
    }
}

/// One payment.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDto {
    /// RFC 3339 payment timestamp.
    pub paid_at: String,
    /// Purchaser email.
    pub user_email: String,
    /// Number of line items.
    pub item_count: usize,
    /// Line items.
    pub items: Vec<PaymentItemDto>,
}

impl From<&Payment> for PaymentDto {
    fn from(payment: &Payment) -> Self {
        Self {
            paid_at: payment.paid_at().to_rfc3339(),
            user_email: payment.user().email().to_string(),
            item_count: payment.item_count(),
            items: payment.items().iter().map(PaymentItemDto::from).collect(),
        }
    }
}

/// List response for payment endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentListResponse {
    /// Payments, in query order.
    pub data: Vec<PaymentDto>,
    /// Number of payments returned.
    pub total: usize,
}

impl PaymentListResponse {
    /// Renders an ordered query result as-is.
    #[must_use]
    pub fn from_ordered(payments: &[Payment]) -> Self {
        Self {
            data: payments.iter().map(PaymentDto::from).collect(),
            total: payments.len(),
        }
    }

    /// Renders a set result ordered by timestamp, then purchaser.
    #[must_use]
    pub fn from_set(payments: HashSet<Payment>) -> Self {
        let mut ordered: Vec<Payment> = payments.into_iter().collect();
        ordered.sort_by(|a, b| {
            a.paid_at()
                .cmp(b.paid_at())
                .then_with(|| a.user().email().cmp(b.user().email()))
                .then_with(|| a.item_count().cmp(&b.item_count()))
        });
        Self::from_ordered(&ordered)
    }
}

/// Line items bought by one user.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentItemListResponse {
    /// Email the items were looked up by.
    pub email: String,
    /// Flattened line items.
    pub data: Vec<PaymentItemDto>,
    /// Number of items returned.
    pub total: usize,
}
