//! Payment entities: payments, their line items and the purchasing user.
//!
//! All three are immutable values supplied by a
//! [`super::PaymentSource`]. Equality and hashing are by value, so two
//! payments with identical fields collapse into one set member. A
//! payment's timestamp counts as identical only if both the instant and
//! the recorded offset match.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The purchaser of a payment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    email: String,
}

impl User {
    /// Creates a user with the given email address.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Email address, used as an exact-match lookup key.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// One product line within a payment.
///
/// Prices are exact decimals. Callers of the discount aggregation assume
/// `discount == regular_price - final_price`; see [`Self::is_consistent`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentItem {
    name: String,
    regular_price: Decimal,
    final_price: Decimal,
    discount: Decimal,
}

impl PaymentItem {
    /// Creates a line item.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        regular_price: Decimal,
        final_price: Decimal,
        discount: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            regular_price,
            final_price,
            discount,
        }
    }

    /// Product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price before discount.
    #[must_use]
    pub const fn regular_price(&self) -> Decimal {
        self.regular_price
    }

    /// Price actually charged.
    #[must_use]
    pub const fn final_price(&self) -> Decimal {
        self.final_price
    }

    /// Discount granted on this line.
    #[must_use]
    pub const fn discount(&self) -> Decimal {
        self.discount
    }

    /// Returns `true` if `discount == regular_price - final_price`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.regular_price.checked_sub(self.final_price) == Some(self.discount)
    }
}

/// One completed transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    paid_at: DateTime<FixedOffset>,
    user: User,
    #[serde(default)]
    items: Vec<PaymentItem>,
}

impl Payment {
    /// Creates a payment.
    #[must_use]
    pub fn new(paid_at: DateTime<FixedOffset>, user: User, items: Vec<PaymentItem>) -> Self {
        Self {
            paid_at,
            user,
            items,
        }
    }

    /// Timestamp of the payment, in the offset it was recorded with.
    #[must_use]
    pub const fn paid_at(&self) -> &DateTime<FixedOffset> {
        &self.paid_at
    }

    /// The purchasing user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Line items; order carries no meaning.
    #[must_use]
    pub fn items(&self) -> &[PaymentItem] {
        &self.items
    }

    /// Consumes the payment, returning its line items.
    #[must_use]
    pub fn into_items(self) -> Vec<PaymentItem> {
        self.items
    }

    /// Number of line items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// `DateTime` alone compares instants; the offset decides the calendar month.
impl PartialEq for Payment {
    fn eq(&self, other: &Self) -> bool {
        self.paid_at == other.paid_at
            && self.paid_at.offset() == other.paid_at.offset()
            && self.user == other.user
            && self.items == other.items
    }
}

impl Eq for Payment {}

impl Hash for Payment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.paid_at.hash(state);
        self.paid_at.offset().hash(state);
        self.user.hash(state);
        self.items.hash(state);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn timestamp(s: &str) -> DateTime<FixedOffset> {
        let Ok(dt) = DateTime::parse_from_rfc3339(s) else {
            panic!("valid timestamp: {s}");
        };
        dt
    }

    #[test]
    fn consistency_check_compares_discount() {
        let ok = PaymentItem::new(
            "Mouse",
            Decimal::new(2500, 2),
            Decimal::new(2000, 2),
            Decimal::new(500, 2),
        );
        assert!(ok.is_consistent());
        let off = PaymentItem::new("Mouse", Decimal::new(2500, 2), Decimal::new(2000, 2), Decimal::ONE);
        assert!(!off.is_consistent());
    }

    #[test]
    fn equal_payments_deduplicate() {
        let item = PaymentItem::new("Pen", Decimal::TEN, Decimal::TEN, Decimal::ZERO);
        let a = Payment::new(
            timestamp("2023-01-15T10:00:00+00:00"),
            User::new("a@example.com"),
            vec![item.clone()],
        );
        let b = a.clone();
        let c = Payment::new(
            timestamp("2023-01-15T10:00:01+00:00"),
            User::new("a@example.com"),
            vec![item],
        );
        let set: HashSet<Payment> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn same_instant_different_offset_is_distinct() {
        let item = PaymentItem::new("Pen", Decimal::TEN, Decimal::TEN, Decimal::ZERO);
        let west = Payment::new(
            timestamp("2023-01-31T23:30:00-02:00"),
            User::new("a@example.com"),
            vec![item.clone()],
        );
        let utc = Payment::new(
            timestamp("2023-02-01T01:30:00+00:00"),
            User::new("a@example.com"),
            vec![item],
        );
        assert_eq!(west.paid_at(), utc.paid_at());
        assert_ne!(west, utc);
        let set: HashSet<Payment> = [west.clone(), utc, west].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn numeric_amounts_keep_every_digit() {
        let json = r#"{
            "name": "Server rack",
            "regular_price": 12345678901234567.89,
            "final_price": 12345678901234567.89,
            "discount": 0.10
        }"#;
        let Ok(item) = serde_json::from_str::<PaymentItem>(json) else {
            panic!("valid item json");
        };
        let Ok(expected) = "12345678901234567.89".parse::<Decimal>() else {
            panic!("valid decimal");
        };
        assert_eq!(item.regular_price(), expected);
        assert_eq!(item.regular_price().to_string(), "12345678901234567.89");
        assert_eq!(item.discount(), Decimal::new(10, 2));
    }

    #[test]
    fn deserializes_string_amounts() {
        let json = r#"{
            "paid_at": "2023-02-10T12:00:00+01:00",
            "user": { "email": "b@example.com" },
            "items": [
                { "name": "Desk", "regular_price": "60.00", "final_price": "50.00", "discount": "10.00" }
            ]
        }"#;
        let Ok(payment) = serde_json::from_str::<Payment>(json) else {
            panic!("valid payment json");
        };
        assert_eq!(payment.user().email(), "b@example.com");
        assert_eq!(payment.item_count(), 1);
        let Some(item) = payment.items().first() else {
            panic!("one item");
        };
        assert_eq!(item.final_price(), Decimal::new(5000, 2));
        assert!(item.is_consistent());
    }

    #[test]
    fn missing_items_defaults_to_empty() {
        let json = r#"{ "paid_at": "2023-02-10T12:00:00Z", "user": { "email": "c@example.com" } }"#;
        let Ok(payment) = serde_json::from_str::<Payment>(json) else {
            panic!("valid payment json");
        };
        assert_eq!(payment.item_count(), 0);
    }
}
