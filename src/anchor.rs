//! Anchor blocks: maximal runs of adjacent off days.

use serde::{Deserialize, Serialize};

use crate::types::CalendarDay;

/// A maximal run of consecutive off days, as indices into the classified
/// calendar (both ends inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorBlock {
    pub first: usize,
    pub last:  usize,
    /// The run includes a holiday that falls on a weekday
    pub has_weekday_holiday: bool,
}

/// Groups transitively adjacent off days into blocks, in calendar order.
pub fn anchor_blocks(days: &[CalendarDay]) -> Vec<AnchorBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<AnchorBlock> = None;

    for (idx, day) in days.iter().enumerate() {
        if !day.kind.is_off() {
            blocks.extend(current.take());
            continue;
        }
        let block = current.get_or_insert(AnchorBlock {
            first: idx,
            last:  idx,
            has_weekday_holiday: false,
        });
        block.last = idx;
        block.has_weekday_holiday |= day.kind.is_weekday_holiday();
    }
    blocks.extend(current);
    blocks
}

/// True if any block can seed a chain, i.e. holds a weekday holiday.
pub fn has_seed(blocks: &[AnchorBlock]) -> bool {
    blocks.iter().any(|b| b.has_weekday_holiday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::test_utils::{date, holidays};

    #[test]
    fn test_weekends_form_blocks() {
        // Mon 2025-03-03 .. Sun 2025-03-16: two weekends
        let days = classify(date(2025, 3, 3), date(2025, 3, 16), &holidays(&[]));
        let blocks = anchor_blocks(&days);

        assert_eq!(blocks.len(), 2);
        assert_eq!((blocks[0].first, blocks[0].last), (5, 6));
        assert_eq!((blocks[1].first, blocks[1].last), (12, 13));
        assert!(!has_seed(&blocks));
    }

    #[test]
    fn test_holiday_merges_with_weekend() {
        // Fri 2025-03-07 holiday joins the weekend after it
        let days = classify(date(2025, 3, 3), date(2025, 3, 12), &holidays(&[(2025, 3, 7)]));
        let blocks = anchor_blocks(&days);

        assert_eq!(blocks.len(), 1);
        assert_eq!((blocks[0].first, blocks[0].last), (4, 6));
        assert!(blocks[0].has_weekday_holiday);
        assert!(has_seed(&blocks));
    }

    #[test]
    fn test_block_runs_to_range_end() {
        // Range ends on Sunday 2025-03-09
        let days = classify(date(2025, 3, 6), date(2025, 3, 9), &holidays(&[]));
        let blocks = anchor_blocks(&days);

        assert_eq!(blocks, vec![AnchorBlock {
            first: 2,
            last:  3,
            has_weekday_holiday: false,
        }]);
    }

    #[test]
    fn test_weekend_holiday_is_not_a_seed() {
        // Saturday 2025-03-29 holiday
        let days = classify(date(2025, 3, 24), date(2025, 4, 4), &holidays(&[(2025, 3, 29)]));
        assert!(!has_seed(&anchor_blocks(&days)));
    }

    #[test]
    fn test_empty_calendar() {
        assert!(anchor_blocks(&[]).is_empty());
    }
}
