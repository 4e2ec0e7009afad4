//! # payment-reports
//!
//! Read-only query and reporting layer over payment records.
//!
//! Every query fetches the full payment snapshot from an injected
//! [`domain::PaymentSource`], then filters, sorts and aggregates it. Money
//! is summed with exact decimals and month filters compare calendar
//! year-months, never elapsed time. Nothing is cached or mutated.
//!
//! ## Architecture
//!
//! ```text
//! Reporting client (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── PaymentQueryService (service/)
//!     │
//!     ├── PaymentSource (domain/)   in-memory or JSON file
//!     └── Clock (domain/)           system or pinned
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
