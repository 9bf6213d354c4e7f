//! Find the longest runs of days off obtainable by spending leave next to
//! public holidays.
//!
//! The core is [`compute_chains`]: a pure, deterministic search over a
//! classified calendar. [`Planner`] wraps it with a holiday provider and
//! explicit caches for callers that look up holidays by country.
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use chrono::NaiveDate;
//! use leave_chain::{Mode, compute_chains};
//!
//! let day = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
//! // A Wednesday holiday
//! let holidays = BTreeSet::from([day(3, 12)]);
//!
//! let chains = compute_chains(day(1, 1), day(12, 31), &holidays, Mode::Optimal);
//! assert_eq!(chains[0].len(), 5);
//! assert_eq!(chains[0].leave_count(), 2);
//! ```

mod anchor;
mod cache;
mod chain;
mod classify;
mod consts;
mod planner;
mod policy;
mod prelude;
mod provider;
mod range;
mod search;
mod types;

#[cfg(test)]
mod test_utils;

pub use anchor::{AnchorBlock, anchor_blocks};
pub use cache::KeyedCache;
pub use chain::{Chain, group_by_month};
pub use classify::classify;
pub use consts::*;
pub use planner::{PlanError, Planner, PlannerConfig};
pub use policy::{Mode, Prune, WindowTally};
pub use provider::{
    HolidayCalendar, HolidayEntry, HolidayProvider, HolidayQuery, ProviderError, StaticHolidayProvider,
};
pub use range::{DateRange, RangeError};
pub use types::{BudgetError, CalendarDay, DayKind, LeaveBudget, MonthKey, MonthKeyError};

use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::debug;

/// Fixed non-working dates supplied by the caller.
pub type HolidayDates = BTreeSet<NaiveDate>;

/// Computes the best leave chains in `[start, end]`.
///
/// Every invocation is independent: identical inputs always produce the
/// same list, longest chains first and equal lengths in chronological
/// order. An inverted range, a horizon without weekday holidays, or a
/// budget no window can meet all yield an empty list.
pub fn compute_chains(start: NaiveDate, end: NaiveDate, holidays: &HolidayDates, mode: Mode) -> Vec<Chain> {
    let days = classify(start, end, holidays);
    if !anchor::has_seed(&anchor_blocks(&days)) {
        debug!("no weekday holiday between {start} and {end}");
        return Vec::new();
    }

    let windows = search::scan(&days, mode);
    let candidates = chain::dedup(
        windows
            .iter()
            .filter_map(|w| chain::assemble(&days, w.first, w.last))
            .collect(),
    );
    let candidate_count = candidates.len();

    let mut chains = mode.select(candidates);
    chain::sort(&mut chains);

    debug!(
        "{mode}: {} windows, {candidate_count} distinct chains, {} selected between {start} and {end}",
        windows.len(),
        chains.len()
    );
    chains
}
