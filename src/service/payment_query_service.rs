//! Payment query service: stateless reporting queries over a payment snapshot.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::TimeDelta;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::{Clock, Payment, PaymentItem, PaymentSource, YearMonth};
use crate::error::ReportError;

/// Read-only query layer over the payments supplied by a [`PaymentSource`].
///
/// Holds no state besides its collaborators. Every query refetches the full
/// snapshot and rescans it; nothing is cached or indexed between calls.
/// Money is summed exactly with [`Decimal`], starting from zero.
#[derive(Debug, Clone)]
pub struct PaymentQueryService {
    source: Arc<dyn PaymentSource>,
    clock: Arc<dyn Clock>,
}

impl PaymentQueryService {
    /// Creates a new `PaymentQueryService`.
    #[must_use]
    pub fn new(source: Arc<dyn PaymentSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    /// Returns a reference to the injected [`Clock`].
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Payments ordered by timestamp, earliest first.
    ///
    /// # Errors
    ///
    /// Propagates a [`PaymentSource`] failure.
    pub fn payments_sorted_by_date_asc(&self) -> Result<Vec<Payment>, ReportError> {
        let mut payments = self.snapshot()?;
        payments.sort_by(|a, b| a.paid_at().cmp(b.paid_at()));
        Ok(payments)
    }

    /// Payments ordered by timestamp, latest first. Ties keep source order.
    ///
    /// # Errors
    ///
    /// Propagates a [`PaymentSource`] failure.
    pub fn payments_sorted_by_date_desc(&self) -> Result<Vec<Payment>, ReportError> {
        let mut payments = self.snapshot()?;
        payments.sort_by(|a, b| b.paid_at().cmp(a.paid_at()));
        Ok(payments)
    }

    /// Payments ordered by number of line items, fewest first.
    ///
    /// # Errors
    ///
    /// Propagates a [`PaymentSource`] failure.
    pub fn payments_sorted_by_item_count_asc(&self) -> Result<Vec<Payment>, ReportError> {
        let mut payments = self.snapshot()?;
        payments.sort_by_key(Payment::item_count);
        Ok(payments)
    }

    /// Payments ordered by number of line items, most first. Ties keep
    /// source order.
    ///
    /// # Errors
    ///
    /// Propagates a [`PaymentSource`] failure.
    pub fn payments_sorted_by_item_count_desc(&self) -> Result<Vec<Payment>, ReportError> {
        let mut payments = self.snapshot()?;
        payments.sort_by(|a, b| b.item_count().cmp(&a.item_count()));
        Ok(payments)
    }

    /// Payments whose calendar year and month equal `year_month`.
    ///
    /// # Errors
    ///
    /// Propagates a [`PaymentSource`] failure.
    pub fn payments_for_month(&self, year_month: YearMonth) -> Result<Vec<Payment>, ReportError> {
        let payments: Vec<Payment> = self
            .snapshot()?
            .into_iter()
            .filter(|p| year_month.contains(p.paid_at()))
            .collect();
        tracing::debug!(%year_month, count = payments.len(), "payments for month");
        Ok(payments)
    }

    /// Payments in the clock's current calendar month.
    ///
    /// # Errors
    ///
    /// Propagates a [`Clock`] or [`PaymentSource`] failure.
    pub fn payments_for_current_month(&self) -> Result<Vec<Payment>, ReportError> {
        self.payments_for_month(self.clock.year_month_now()?)
    }

    /// Payments made strictly after `now - days`.
    ///
    /// A negative `days` is not clamped: it moves the cutoff into the future.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::DateOutOfRange`] if the cutoff cannot be
    /// represented, and propagates [`Clock`] or [`PaymentSource`] failures.
    pub fn payments_for_last_days(&self, days: i64) -> Result<Vec<Payment>, ReportError> {
        let now = self.clock.now()?;
        let cutoff = TimeDelta::try_days(days)
            .and_then(|delta| now.checked_sub_signed(delta))
            .ok_or(ReportError::DateOutOfRange { days })?;
        let payments: Vec<Payment> = self
            .snapshot()?
            .into_iter()
            .filter(|p| *p.paid_at() > cutoff)
            .collect();
        tracing::debug!(days, %cutoff, count = payments.len(), "payments for last days");
        Ok(payments)
    }

    /// Distinct payments with exactly one line item.
    ///
    /// # Errors
    ///
    /// Propagates a [`PaymentSource`] failure.
    pub fn payments_with_single_item(&self) -> Result<HashSet<Payment>, ReportError> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|p| p.item_count() == 1)
            .collect())
    }

    /// Distinct product names sold in the clock's current calendar month.
    ///
    /// The clock is only consulted when the snapshot is non-empty.
    ///
    /// # Errors
    ///
    /// Propagates a [`Clock`] or [`PaymentSource`] failure.
    pub fn products_sold_in_current_month(&self) -> Result<BTreeSet<String>, ReportError> {
        let payments = self.snapshot()?;
        if payments.is_empty() {
            return Ok(BTreeSet::new());
        }
        let current = self.clock.year_month_now()?;
        let names: BTreeSet<String> = payments
            .iter()
            .filter(|p| current.contains(p.paid_at()))
            .flat_map(Payment::items)
            .map(|item| item.name().to_string())
            .collect();
        tracing::debug!(year_month = %current, count = names.len(), "products sold");
        Ok(names)
    }

    /// Sum of final prices of every item paid in `year_month`; zero if none.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::AmountOverflow`] if the sum leaves the decimal
    /// range, and propagates a [`PaymentSource`] failure.
    pub fn sum_total_for_month(&self, year_month: YearMonth) -> Result<Decimal, ReportError> {
        let payments = self.snapshot()?;
        sum_amounts(
            payments
                .iter()
                .filter(|p| year_month.contains(p.paid_at()))
                .flat_map(Payment::items)
                .map(PaymentItem::final_price),
        )
    }

    /// Sum of discounts of every item paid in the *month of year* of
    /// `year_month`.
    ///
    /// Only the month is compared: January 2022 and January 2023 both count
    /// towards `2023-01`. Kept that way for compatibility with existing
    /// reports; [`Self::sum_total_for_month`] compares the full year-month.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::AmountOverflow`] if the sum leaves the decimal
    /// range, and propagates a [`PaymentSource`] failure.
    pub fn sum_discount_for_month(&self, year_month: YearMonth) -> Result<Decimal, ReportError> {
        let payments = self.snapshot()?;
        sum_amounts(
            payments
                .iter()
                .filter(|p| YearMonth::from_date_time(p.paid_at()).month() == year_month.month())
                .flat_map(Payment::items)
                .map(PaymentItem::discount),
        )
    }

    /// Line items of every payment made by the user with exactly `email`.
    ///
    /// # Errors
    ///
    /// Propagates a [`PaymentSource`] failure.
    pub fn payment_items_for_user_email(
        &self,
        email: &str,
    ) -> Result<Vec<PaymentItem>, ReportError> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|p| p.user().email() == email)
            .flat_map(Payment::into_items)
            .collect())
    }

    /// Distinct payments whose regular-price total is strictly greater
    /// than `threshold`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::PaymentValueNotExact`] if any payment's
    /// regular-price total is fractional or outside `i32`, and
    /// [`ReportError::AmountOverflow`] if it leaves the decimal range; no
    /// partial result is returned. Propagates a [`PaymentSource`] failure.
    pub fn payments_with_value_over(
        &self,
        threshold: i32,
    ) -> Result<HashSet<Payment>, ReportError> {
        let mut matched = HashSet::new();
        for payment in self.snapshot()? {
            if payment_value(&payment)? > threshold {
                matched.insert(payment);
            }
        }
        Ok(matched)
    }

    fn snapshot(&self) -> Result<Vec<Payment>, ReportError> {
        let payments = self.source.find_all()?;
        tracing::trace!(count = payments.len(), "payment snapshot fetched");
        Ok(payments)
    }
}

/// Exact decimal sum, starting from zero.
fn sum_amounts(mut amounts: impl Iterator<Item = Decimal>) -> Result<Decimal, ReportError> {
    amounts.try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount).ok_or(ReportError::AmountOverflow)
    })
}

/// Regular-price total of a payment as an exact `i32`. Never rounds.
fn payment_value(payment: &Payment) -> Result<i32, ReportError> {
    let total = sum_amounts(payment.items().iter().map(PaymentItem::regular_price))?;
    if !total.fract().is_zero() {
        return Err(ReportError::PaymentValueNotExact(total));
    }
    total
        .to_i32()
        .ok_or(ReportError::PaymentValueNotExact(total))
}
