//! Budget policies: which search windows qualify and which chains survive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chain::Chain;
use crate::consts::MAX_SPANNED_MONTHS;
use crate::prelude::*;
use crate::types::{BudgetError, CalendarDay, DayKind, LeaveBudget, MonthKey};

/// How leave is budgeted for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Mode {
    /// Longest chain first, then fewest leave days, spending at most
    /// `LeaveBudget::OPTIMAL` days.
    #[default]
    #[display(fmt = "optimal")]
    Optimal,
    /// Longest chain spending exactly `budget` leave days.
    #[display(fmt = "fixed-budget({budget})")]
    FixedBudget {
        budget:      LeaveBudget,
        /// Per-month leave cap; the budget itself when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        monthly_cap: Option<LeaveBudget>,
    },
}

/// Why extending a window was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Prune {
    #[display(fmt = "total leave above budget")]
    OverBudget,
    #[display(fmt = "monthly leave above cap")]
    OverMonthlyCap,
    #[display(fmt = "spans more than {} months", MAX_SPANNED_MONTHS)]
    TooManyMonths,
}

impl Mode {
    /// Fixed-budget mode with the budget as the monthly cap.
    ///
    /// # Errors
    /// Returns `BudgetError::OutOfRange` unless `1 <= budget <= 15`.
    pub fn fixed(budget: u8) -> Result<Self, BudgetError> {
        Ok(Self::FixedBudget {
            budget:      LeaveBudget::new(budget)?,
            monthly_cap: None,
        })
    }

    /// Fixed-budget mode with a separate per-month cap.
    ///
    /// # Errors
    /// Returns `BudgetError::OutOfRange` if either value is out of range.
    pub fn fixed_with_cap(budget: u8, monthly_cap: u8) -> Result<Self, BudgetError> {
        Ok(Self::FixedBudget {
            budget:      LeaveBudget::new(budget)?,
            monthly_cap: Some(LeaveBudget::new(monthly_cap)?),
        })
    }

    /// Leave budget in force for the search
    pub const fn budget(self) -> LeaveBudget {
        match self {
            Self::Optimal => LeaveBudget::OPTIMAL,
            Self::FixedBudget { budget, .. } => budget,
        }
    }

    /// Most leave days allowed in any single month
    pub fn monthly_cap(self) -> LeaveBudget {
        match self {
            Self::Optimal => LeaveBudget::OPTIMAL,
            Self::FixedBudget { budget, monthly_cap } => monthly_cap.unwrap_or(budget),
        }
    }

    /// Returns the rule a window breaks, if any. Every rule is monotonic in
    /// the window end: once broken, longer windows from the same start
    /// break it too.
    pub fn prune(self, tally: &WindowTally) -> Option<Prune> {
        if tally.months_spanned() > MAX_SPANNED_MONTHS {
            Some(Prune::TooManyMonths)
        } else if tally.total_leave() > self.budget().count() {
            Some(Prune::OverBudget)
        } else if tally.max_monthly_leave() > self.monthly_cap().count() {
            Some(Prune::OverMonthlyCap)
        } else {
            None
        }
    }

    /// Whether a window qualifies as a chain core under this mode.
    pub fn accepts(self, tally: &WindowTally) -> bool {
        if !tally.has_weekday_holiday() || self.prune(tally).is_some() {
            return false;
        }
        match self {
            Self::Optimal => true,
            Self::FixedBudget { budget, .. } => {
                tally.total_leave() == budget.count() && split_allowed(budget, &tally.split())
            },
        }
    }

    /// Keeps only the longest chains, preserving input order. Optimal mode
    /// then keeps only those spending the fewest leave days. Ties all
    /// survive.
    pub fn select(self, candidates: Vec<Chain>) -> Vec<Chain> {
        let Some(longest) = candidates.iter().map(Chain::len).max() else {
            return candidates;
        };
        let mut kept: Vec<Chain> = candidates.into_iter().filter(|c| c.len() == longest).collect();

        let fewest = match self {
            Self::Optimal => kept.iter().map(Chain::leave_count).min(),
            Self::FixedBudget { .. } => None,
        };
        if let Some(fewest) = fewest {
            kept.retain(|c| c.leave_count() == fewest);
        }
        kept
    }
}

/// Two-month split rules for fixed budgets: an odd budget must put a
/// single day in one of the months, and a budget of two must put one day
/// in each.
fn split_allowed(budget: LeaveBudget, split: &[usize]) -> bool {
    let &[first, second] = split else {
        return true;
    };
    let k = budget.count();
    if budget.is_odd() {
        (first, second) == (1, k - 1) || (first, second) == (k - 1, 1)
    } else if k == 2 {
        first == 1 && second == 1
    } else {
        true
    }
}

/// Running counters for one search window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowTally {
    leave_by_month:      BTreeMap<MonthKey, usize>,
    total_leave:         usize,
    has_weekday_holiday: bool,
}

impl WindowTally {
    /// Extends the window by one day; a workday is spent as leave.
    pub fn push(&mut self, day: &CalendarDay) {
        let spent = self.leave_by_month.entry(day.month_key).or_insert(0);
        match day.kind {
            DayKind::Workday => {
                *spent += 1;
                self.total_leave += 1;
            },
            DayKind::Holiday => self.has_weekday_holiday = true,
            DayKind::Weekend | DayKind::WeekendHoliday => {},
        }
    }

    pub const fn total_leave(&self) -> usize {
        self.total_leave
    }

    pub const fn has_weekday_holiday(&self) -> bool {
        self.has_weekday_holiday
    }

    /// Distinct months the window touches
    pub fn months_spanned(&self) -> usize {
        self.leave_by_month.len()
    }

    pub fn max_monthly_leave(&self) -> usize {
        self.leave_by_month.values().copied().max().unwrap_or(0)
    }

    /// Leave spent per touched month, chronologically
    pub fn split(&self) -> Vec<usize> {
        self.leave_by_month.values().copied().collect()
    }
}
