//! Domain layer: payment entities, calendar months, and collaborators.
//!
//! This module contains the read-only payment model, the [`YearMonth`]
//! filter granularity, and the two injected collaborators the query
//! service depends on: a [`PaymentSource`] and a [`Clock`].

pub mod clock;
pub mod payment;
pub mod source;
pub mod year_month;

pub use clock::{Clock, FixedClock, SystemClock};
pub use payment::{Payment, PaymentItem, User};
pub use source::{InMemoryPaymentSource, JsonFilePaymentSource, PaymentSource};
pub use year_month::YearMonth;
