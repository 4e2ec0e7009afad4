//! Calendar year-month value type.
//!
//! [`YearMonth`] is the granularity used by the month filters. It is derived
//! from a timestamp in that timestamp's own offset, so a payment made at
//! `2023-01-31T23:30:00-02:00` belongs to January even though the same
//! instant is already February in UTC. The text form is strictly
//! `YYYY-MM` with a four-digit year.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// A calendar (year, month) pair.
///
/// Ordered chronologically. Parsed from and displayed as `YYYY-MM`, and
/// serialized as that string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a `YearMonth`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidYearMonth`] if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, ReportError> {
        if !(1..=12).contains(&month) {
            return Err(ReportError::InvalidYearMonth(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    /// Returns the calendar year-month of `date_time` in its own time zone.
    #[must_use]
    pub fn from_date_time<Tz: TimeZone>(date_time: &DateTime<Tz>) -> Self {
        Self {
            year: date_time.year(),
            month: date_time.month(),
        }
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month of the year, `1..=12`.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns `true` if `date_time` falls inside this year-month.
    #[must_use]
    pub fn contains<Tz: TimeZone>(&self, date_time: &DateTime<Tz>) -> bool {
        Self::from_date_time(date_time) == *self
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReportError::InvalidYearMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let digits =
            |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(year, 4) || !digits(month, 2) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(year_month: YearMonth) -> Self {
        year_month.to_string()
    }
}
