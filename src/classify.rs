//! Calendar classification: one typed record per date of the horizon.

use chrono::NaiveDate;

use crate::types::{CalendarDay, DayKind};
use crate::HolidayDates;

/// Classifies every date in `[start, end]` against the holiday set.
///
/// An inverted range yields an empty vector rather than an error.
pub fn classify(start: NaiveDate, end: NaiveDate, holidays: &HolidayDates) -> Vec<CalendarDay> {
    if start > end {
        return Vec::new();
    }
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| CalendarDay::new(date, DayKind::classify(date, holidays.contains(&date))))
        .collect()
}
