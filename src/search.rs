//! Leave placement search over every start/end window of the horizon.

use log::trace;

use crate::policy::{Mode, WindowTally};
use crate::types::CalendarDay;

/// An accepted search window, as inclusive indices into the calendar.
/// This is the minimal core of a chain before expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub first: usize,
    pub last:  usize,
}

/// Scans every window `[first, last]`, extending `last` from each `first`
/// until the mode's budget, monthly cap or month span is exceeded.
///
/// Windows are returned in scan order: by start, then by end.
pub fn scan(days: &[CalendarDay], mode: Mode) -> Vec<Window> {
    let mut accepted = Vec::new();

    for first in 0..days.len() {
        let mut tally = WindowTally::default();
        for (last, day) in days.iter().enumerate().skip(first) {
            tally.push(day);
            if let Some(reason) = mode.prune(&tally) {
                trace!("window from {} stopped at {}: {reason}", days[first].date, day.date);
                break;
            }
            if mode.accepts(&tally) {
                accepted.push(Window { first, last });
            }
        }
    }
    accepted
}
