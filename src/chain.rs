//! Chain assembly: maximal expansion, identity, ordering and month grouping.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::prelude::*;
use crate::types::{CalendarDay, DayKind, MonthKey};

/// A contiguous run of days off: weekends, holidays and spent leave,
/// bounded by workdays or the edge of the search horizon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[display(fmt = "{start}/{end}")]
pub struct Chain {
    start:      NaiveDate,
    end:        NaiveDate,
    days:       Vec<NaiveDate>,
    leave_days: Vec<NaiveDate>,
    month_keys: Vec<MonthKey>,
}

impl Chain {
    /// First day off (inclusive)
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day off (inclusive)
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Every date of the chain in order
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Workdays that must be taken as leave
    pub fn leave_days(&self) -> &[NaiveDate] {
        &self.leave_days
    }

    /// Distinct months touched, chronologically
    pub fn month_keys(&self) -> &[MonthKey] {
        &self.month_keys
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn leave_count(&self) -> usize {
        self.leave_days.len()
    }

    /// Deduplication key
    pub const fn identity(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    pub fn touches(&self, month: MonthKey) -> bool {
        self.month_keys.contains(&month)
    }

    /// Leave days falling in `month`
    pub fn leave_in(&self, month: MonthKey) -> usize {
        self.leave_days.iter().filter(|d| MonthKey::of(**d) == month).count()
    }
}

/// Grows `[first, last]` over adjacent off days until a workday or the
/// horizon edge. Expanded bounds are a fixed point.
pub fn expand_bounds(days: &[CalendarDay], first: usize, last: usize) -> (usize, usize) {
    let mut first = first;
    let mut last = last;
    while first > 0 && days[first - 1].kind.is_off() {
        first -= 1;
    }
    while last + 1 < days.len() && days[last + 1].kind.is_off() {
        last += 1;
    }
    (first, last)
}

/// Builds the chain for an accepted window, `None` if the window does not
/// lie within `days`.
pub fn assemble(days: &[CalendarDay], first: usize, last: usize) -> Option<Chain> {
    if first > last || last >= days.len() {
        return None;
    }
    let (first, last) = expand_bounds(days, first, last);
    let span = days.get(first..=last)?;
    let start = span.first()?.date;
    let end = span.last()?.date;

    let mut month_keys: Vec<MonthKey> = Vec::new();
    for day in span {
        if month_keys.last() != Some(&day.month_key) {
            month_keys.push(day.month_key);
        }
    }

    Some(Chain {
        start,
        end,
        days: span.iter().map(|d| d.date).collect(),
        leave_days: span
            .iter()
            .filter(|d| d.kind == DayKind::Workday)
            .map(|d| d.date)
            .collect(),
        month_keys,
    })
}

/// Drops every chain whose identity was already seen, keeping the first.
pub fn dedup(chains: Vec<Chain>) -> Vec<Chain> {
    let mut seen = HashSet::new();
    chains.into_iter().filter(|c| seen.insert(c.identity())).collect()
}

/// Longest first; equal lengths in chronological order.
pub fn compare(a: &Chain, b: &Chain) -> Ordering {
    b.len().cmp(&a.len()).then_with(|| a.start.cmp(&b.start))
}

pub fn sort(chains: &mut [Chain]) {
    chains.sort_by(compare);
}

/// Groups chains under every month they touch, keeping result order within
/// each month. This is the view a calendar shows one month at a time.
pub fn group_by_month(chains: &[Chain]) -> BTreeMap<MonthKey, Vec<&Chain>> {
    let mut groups: BTreeMap<MonthKey, Vec<&Chain>> = BTreeMap::new();
    for chain in chains {
        for month in &chain.month_keys {
            groups.entry(*month).or_default().push(chain);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::test_utils::{date, holidays};

    fn position(days: &[CalendarDay], y: i32, m: u32, d: u32) -> usize {
        days.iter().position(|c| c.date == date(y, m, d)).unwrap()
    }

    #[test]
    fn test_assemble_expands_over_weekends() {
        // Wed 2025-03-12 holiday, Thu+Fri leave
        let days = classify(date(2025, 3, 1), date(2025, 3, 31), &holidays(&[(2025, 3, 12)]));
        let chain = assemble(&days, position(&days, 2025, 3, 12), position(&days, 2025, 3, 14)).unwrap();

        assert_eq!(chain.start(), date(2025, 3, 12));
        assert_eq!(chain.end(), date(2025, 3, 16));
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.leave_days(), &[date(2025, 3, 13), date(2025, 3, 14)]);
        assert_eq!(chain.leave_count(), 2);
        assert_eq!(chain.month_keys(), &[MonthKey::new(2025, 3)]);
        assert_eq!(chain.to_string(), "2025-03-12/2025-03-16");
    }

    #[test]
    fn test_assemble_stops_at_horizon() {
        // Horizon starts on Sunday 2025-03-02
        let days = classify(date(2025, 3, 2), date(2025, 3, 10), &holidays(&[(2025, 3, 3)]));
        let chain = assemble(&days, 1, 1).unwrap();

        assert_eq!(chain.identity(), (date(2025, 3, 2), date(2025, 3, 3)));
        assert!(chain.leave_days().is_empty());
    }

    #[test]
    fn test_assemble_rejects_bad_window() {
        let days = classify(date(2025, 3, 1), date(2025, 3, 5), &holidays(&[]));
        assert!(assemble(&days, 3, 2).is_none());
        assert!(assemble(&days, 0, 5).is_none());
    }

    #[test]
    fn test_expand_bounds_is_fixed_point() {
        let days = classify(
            date(2025, 4, 1),
            date(2025, 5, 31),
            &holidays(&[(2025, 4, 18), (2025, 4, 21), (2025, 5, 1)]),
        );
        for first in 0..days.len() {
            let (a, b) = expand_bounds(&days, first, first);
            assert_eq!(expand_bounds(&days, a, b), (a, b));
        }
    }

    #[test]
    fn test_month_keys_across_boundary() {
        // Fri 2025-01-31 holiday runs into the February weekend
        let days = classify(date(2025, 1, 20), date(2025, 2, 10), &holidays(&[(2025, 1, 31)]));
        let chain = assemble(&days, position(&days, 2025, 1, 31), position(&days, 2025, 1, 31)).unwrap();

        assert_eq!(chain.month_keys(), &[MonthKey::new(2025, 1), MonthKey::new(2025, 2)]);
        assert!(chain.touches(MonthKey::new(2025, 2)));
        assert_eq!(chain.leave_in(MonthKey::new(2025, 1)), 0);
    }

    #[test]
    fn test_dedup_keeps_first() {
        let days = classify(date(2025, 3, 1), date(2025, 3, 31), &holidays(&[(2025, 3, 14)]));
        let fri = position(&days, 2025, 3, 14);
        let sat = position(&days, 2025, 3, 15);

        let chains = vec![
            assemble(&days, fri, fri).unwrap(),
            assemble(&days, sat, sat).unwrap(),
            assemble(&days, fri, sat).unwrap(),
        ];
        let unique = dedup(chains);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].identity(), (date(2025, 3, 14), date(2025, 3, 16)));
    }

    #[test]
    fn test_sort_length_then_start() {
        let days = classify(
            date(2025, 3, 1),
            date(2025, 3, 31),
            &holidays(&[(2025, 3, 7), (2025, 3, 24), (2025, 3, 17)]),
        );
        let a = assemble(&days, position(&days, 2025, 3, 24), position(&days, 2025, 3, 24)).unwrap();
        let b = assemble(&days, position(&days, 2025, 3, 17), position(&days, 2025, 3, 18)).unwrap();
        let c = assemble(&days, position(&days, 2025, 3, 7), position(&days, 2025, 3, 7)).unwrap();

        let mut sorted = dedup(vec![a.clone(), b.clone(), c.clone(), a.clone()]);
        sort(&mut sorted);
        assert_eq!(sorted, vec![b, c, a]);
    }

    #[test]
    fn test_group_by_month() {
        let days = classify(
            date(2025, 1, 1),
            date(2025, 3, 31),
            &holidays(&[(2025, 1, 31), (2025, 3, 14)]),
        );
        let spanning = assemble(&days, position(&days, 2025, 1, 31), position(&days, 2025, 1, 31)).unwrap();
        let march = assemble(&days, position(&days, 2025, 3, 14), position(&days, 2025, 3, 14)).unwrap();
        let chains = vec![spanning.clone(), march.clone()];

        let groups = group_by_month(&chains);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&MonthKey::new(2025, 1)], vec![&spanning]);
        assert_eq!(groups[&MonthKey::new(2025, 2)], vec![&spanning]);
        assert_eq!(groups[&MonthKey::new(2025, 3)], vec![&march]);
    }

    #[test]
    fn test_chain_serialize() {
        let days = classify(date(2025, 3, 1), date(2025, 3, 31), &holidays(&[(2025, 3, 14)]));
        let chain = assemble(&days, position(&days, 2025, 3, 14), position(&days, 2025, 3, 14)).unwrap();

        let json = serde_json::to_value(&chain).unwrap();
        assert_eq!(json["start"], "2025-03-14");
        assert_eq!(json["end"], "2025-03-16");
        assert_eq!(json["month_keys"][0]["month"], 3);
        assert_eq!(json["leave_days"].as_array().map(Vec::len), Some(0));
    }
}
