//! Service layer: payment queries.
//!
//! [`PaymentQueryService`] reads a fresh snapshot from the injected
//! [`super::domain::PaymentSource`] on every call and derives its answer
//! with a pure filter/sort/aggregate pipeline.

pub mod payment_query_service;

pub use payment_query_service::PaymentQueryService;
