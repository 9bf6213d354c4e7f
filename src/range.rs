use chrono::NaiveDate;

use crate::{DECEMBER, JANUARY, MAX_LOOKAHEAD_MONTHS, prelude::*};

/// An inclusive range of calendar dates.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: NaiveDate,
    end:   NaiveDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Lookahead longer than a year.
    #[error("Invalid lookahead: {0} months (must be 0-{max})", max = MAX_LOOKAHEAD_MONTHS)]
    InvalidLookahead(u8),

    /// The year cannot be represented as a calendar date.
    #[error("Year out of range: {0}")]
    YearOutOfRange(i32),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Search horizon for a planning year: 1 January of `year` through the
    /// last day of the `lookahead_months`-th month of the following year.
    /// A lookahead of zero ends the horizon on 31 December of `year`.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidLookahead` if the lookahead exceeds
    /// `MAX_LOOKAHEAD_MONTHS`, or `RangeError::YearOutOfRange` if the
    /// horizon leaves chrono's representable dates.
    pub fn planning_horizon(year: i32, lookahead_months: u8) -> Result<Self, RangeError> {
        if lookahead_months > MAX_LOOKAHEAD_MONTHS {
            return Err(RangeError::InvalidLookahead(lookahead_months));
        }
        let start = NaiveDate::from_ymd_opt(year, JANUARY, 1).ok_or(RangeError::YearOutOfRange(year))?;
        let end = if lookahead_months == 0 {
            NaiveDate::from_ymd_opt(year, DECEMBER, 31)
        } else {
            last_day_of_month(year + 1, u32::from(lookahead_months))
        }
        .ok_or(RangeError::YearOutOfRange(year))?;
        Self::new(start, end)
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.start <= *date && *date <= self.end
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == DECEMBER {
        (year + 1, JANUARY)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
