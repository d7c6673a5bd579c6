//! Claim periods
//!
//! A lecturer claims for the hours worked in one calendar month. The period
//! is a month/year pair constrained to the range the claims office accepts.

use chrono::{Datelike, Month, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// First year the claims office accepts
pub const MIN_CLAIM_YEAR: i32 = 2020;
/// Last year the claims office accepts
pub const MAX_CLAIM_YEAR: i32 = 2100;

/// Errors related to claim periods
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Month must be between 1 and 12")]
    InvalidMonth(u32),

    #[error("Year must be between {MIN_CLAIM_YEAR} and {MAX_CLAIM_YEAR}")]
    InvalidYear(i32),
}

/// The month a claim covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClaimPeriod {
    year: i32,
    month: u32,
}

impl ClaimPeriod {
    /// Creates a period, rejecting out-of-range months and years
    pub fn new(month: u32, year: i32) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::InvalidMonth(month));
        }
        if !(MIN_CLAIM_YEAR..=MAX_CLAIM_YEAR).contains(&year) {
            return Err(TemporalError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The period containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The period containing today (UTC)
    pub fn current() -> Self {
        Self::containing(Utc::now().date_naive())
    }

    /// The calendar month before this one
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for ClaimPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // month is always 1..=12, so the conversion cannot fail
        match u8::try_from(self.month).ok().and_then(|m| Month::try_from(m).ok()) {
            Some(month) => write!(f, "{} {}", month.name(), self.year),
            None => write!(f, "{:02}/{}", self.month, self.year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_period() {
        let period = ClaimPeriod::new(3, 2025).unwrap();
        assert_eq!(period.month(), 3);
        assert_eq!(period.year(), 2025);
        assert_eq!(period.to_string(), "March 2025");
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(ClaimPeriod::new(13, 2025), Err(TemporalError::InvalidMonth(13)));
        assert_eq!(ClaimPeriod::new(0, 2025), Err(TemporalError::InvalidMonth(0)));
    }

    #[test]
    fn test_previous_wraps_year() {
        let january = ClaimPeriod::new(1, 2025).unwrap();
        let december = january.previous();
        assert_eq!(december.month(), 12);
        assert_eq!(december.year(), 2024);
    }
}
