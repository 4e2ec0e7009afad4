//! Report service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::domain::{
    Clock, FixedClock, InMemoryPaymentSource, JsonFilePaymentSource, PaymentSource, SystemClock,
};

/// Top-level service configuration.
///
/// Loaded once at startup via [`ReportConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// JSON file holding the payments. `None` serves an empty dataset.
    pub payments_file: Option<PathBuf>,

    /// Time zone reports are computed in.
    pub clock_offset: FixedOffset,

    /// Pins the clock to this instant instead of reading the wall clock.
    pub clock_fixed_at: Option<DateTime<FixedOffset>>,
}

impl ReportConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR`, `CLOCK_UTC_OFFSET_SECS` or
    /// `CLOCK_FIXED_AT` is set but cannot be parsed.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let payments_file = std::env::var("PAYMENTS_FILE")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let offset_secs: i32 = match std::env::var("CLOCK_UTC_OFFSET_SECS") {
            Ok(v) => v.parse()?,
            Err(_) => 0,
        };
        let clock_offset = FixedOffset::east_opt(offset_secs)
            .ok_or_else(|| format!("CLOCK_UTC_OFFSET_SECS out of range: {offset_secs}"))?;

        let clock_fixed_at = match std::env::var("CLOCK_FIXED_AT") {
            Ok(v) if !v.is_empty() => Some(DateTime::parse_from_rfc3339(&v)?),
            _ => None,
        };

        Ok(Self {
            listen_addr,
            payments_file,
            clock_offset,
            clock_fixed_at,
        })
    }

    /// Builds the payment source described by this configuration.
    #[must_use]
    pub fn payment_source(&self) -> Arc<dyn PaymentSource> {
        match &self.payments_file {
            Some(path) => Arc::new(JsonFilePaymentSource::new(path.clone())),
            None => Arc::new(InMemoryPaymentSource::default()),
        }
    }

    /// Builds the clock described by this configuration.
    ///
    /// A pinned instant is reported in [`Self::clock_offset`].
    #[must_use]
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.clock_fixed_at {
            Some(instant) => Arc::new(FixedClock::new(instant.with_timezone(&self.clock_offset))),
            None => Arc::new(SystemClock::new(self.clock_offset)),
        }
    }
}
