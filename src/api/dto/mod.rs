//! Data Transfer Objects for REST response serialization.
//!
//! All monetary amounts are serialized as decimal strings so no precision
//! is lost to JSON numbers.

pub mod payment_dto;
pub mod report_dto;

pub use payment_dto::*;
pub use report_dto::*;
