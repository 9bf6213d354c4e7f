use chrono::NaiveDate;

use crate::HolidayDates;
use crate::types::{CalendarDay, DayKind};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn day(year: i32, month: u32, d: u32, kind: DayKind) -> CalendarDay {
    CalendarDay::new(date(year, month, d), kind)
}

pub fn holidays(dates: &[(i32, u32, u32)]) -> HolidayDates {
    dates.iter().map(|&(y, m, d)| date(y, m, d)).collect()
}
