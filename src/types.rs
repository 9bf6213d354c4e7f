use crate::consts::{DATE_SEPARATOR, MAX_LEAVE_BUDGET, MIN_LEAVE_BUDGET, OPTIMAL_LEAVE_BUDGET};
use crate::prelude::*;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU8;
use std::str::FromStr;

/// Error returned when a leave budget is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BudgetError {
    /// Budget outside `MIN_LEAVE_BUDGET..=MAX_LEAVE_BUDGET`.
    #[error("Invalid leave budget: {0} (must be {min}-{max})", min = MIN_LEAVE_BUDGET, max = MAX_LEAVE_BUDGET)]
    OutOfRange(u8),
}

/// Error returned when a month key cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonthKeyError {
    /// No `YYYY-MM` separator.
    #[error("Invalid month key format (expected YYYY{sep}MM): {0}", sep = DATE_SEPARATOR)]
    InvalidFormat(String),

    /// Year or month is not a number.
    #[error("Invalid number in month key: {0}")]
    InvalidNumber(String),

    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),
}

/// A number of leave days guaranteed to be in the range `1..=MAX_LEAVE_BUDGET` (1..=15)
/// Uses `NonZeroU8` internally, so 0 is not a valid budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "u8", into = "u8")]
#[display(fmt = "{}", _0)]
pub struct LeaveBudget(NonZeroU8);

impl LeaveBudget {
    /// Implicit budget of optimal mode
    pub const OPTIMAL: Self = match NonZeroU8::new(OPTIMAL_LEAVE_BUDGET) {
        Some(value) => Self(value),
        None => panic!("optimal leave budget must be non-zero"),
    };

    /// Creates a new budget, validating that it's non-zero and <= `MAX_LEAVE_BUDGET`
    ///
    /// # Errors
    /// Returns `BudgetError::OutOfRange` if the value is 0 or > `MAX_LEAVE_BUDGET`.
    pub fn new(value: u8) -> Result<Self, BudgetError> {
        let non_zero = NonZeroU8::new(value).ok_or(BudgetError::OutOfRange(value))?;
        if value > MAX_LEAVE_BUDGET {
            return Err(BudgetError::OutOfRange(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the budget as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Returns the budget widened for counting
    #[inline]
    pub const fn count(self) -> usize {
        self.0.get() as usize
    }

    /// Odd budgets cannot be split evenly across two months
    #[inline]
    pub const fn is_odd(self) -> bool {
        self.0.get() % 2 == 1
    }
}

impl TryFrom<u8> for LeaveBudget {
    type Error = BudgetError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LeaveBudget> for u8 {
    fn from(budget: LeaveBudget) -> Self {
        budget.0.get()
    }
}

/// Year-month bucket used for per-month leave quotas and result grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[display(fmt = "{:04}-{:02}", year, month)]
pub struct MonthKey {
    pub year:  i32,
    pub month: u32,
}

impl MonthKey {
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Month key of the given date
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// First calendar day of this month, `None` for an invalid key
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self::of(date)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once(DATE_SEPARATOR)
            .ok_or_else(|| MonthKeyError::InvalidFormat(s.to_owned()))?;
        let year = year.parse::<i32>().map_err(|_| MonthKeyError::InvalidNumber(s.to_owned()))?;
        let month = month.parse::<u32>().map_err(|_| MonthKeyError::InvalidNumber(s.to_owned()))?;
        let key = Self::new(year, month);
        key.first_day().map(|_| key).ok_or(MonthKeyError::InvalidMonth(month))
    }
}

/// Classification of a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
pub enum DayKind {
    #[display(fmt = "workday")]
    Workday,
    #[display(fmt = "weekend")]
    Weekend,
    /// Public holiday on a weekday
    #[display(fmt = "holiday")]
    Holiday,
    /// Public holiday that was already a weekend day; adds nothing
    #[display(fmt = "weekend-holiday")]
    WeekendHoliday,
}

impl DayKind {
    /// Classifies a date given whether it is a listed holiday.
    pub fn classify(date: NaiveDate, is_holiday: bool) -> Self {
        match (is_weekend(date), is_holiday) {
            (true, true) => Self::WeekendHoliday,
            (false, true) => Self::Holiday,
            (true, false) => Self::Weekend,
            (false, false) => Self::Workday,
        }
    }

    /// Anything but a workday is free time
    #[inline]
    pub const fn is_off(self) -> bool {
        !matches!(self, Self::Workday)
    }

    /// A holiday that actually replaces a working day
    #[inline]
    pub const fn is_weekday_holiday(self) -> bool {
        matches!(self, Self::Holiday)
    }
}

/// One classified date of the search horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display(fmt = "{} ({})", date, kind)]
pub struct CalendarDay {
    pub date:      NaiveDate,
    pub kind:      DayKind,
    pub month_key: MonthKey,
}

impl CalendarDay {
    pub fn new(date: NaiveDate, kind: DayKind) -> Self {
        Self {
            date,
            kind,
            month_key: MonthKey::of(date),
        }
    }
}

/// Saturday and Sunday are the weekend.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
