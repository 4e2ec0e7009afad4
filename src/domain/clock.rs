//! Clock collaborator.
//!
//! [`Clock`] supplies "now" in the report time zone. The current
//! year-month is always derived from the same instant, so the two answers
//! can never disagree.

use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use super::YearMonth;
use crate::error::ReportError;

/// Source of the current instant in a fixed time zone.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current date-time.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::ClockUnavailable`] if the time cannot be read.
    fn now(&self) -> Result<DateTime<FixedOffset>, ReportError>;

    /// Returns the calendar year-month of [`Self::now`].
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::now`].
    fn year_month_now(&self) -> Result<YearMonth, ReportError> {
        self.now().map(|now| YearMonth::from_date_time(&now))
    }
}

/// Wall clock projected onto a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Creates a clock reporting time at `offset`.
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Offset the clock reports in.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Result<DateTime<FixedOffset>, ReportError> {
        Ok(Utc::now().with_timezone(&self.offset))
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    #[must_use]
    pub const fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Result<DateTime<FixedOffset>, ReportError> {
        Ok(self.instant)
    }
}
