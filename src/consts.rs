/// Leave budget used by optimal mode
pub const OPTIMAL_LEAVE_BUDGET: u8 = 2;

/// Smallest budget accepted in fixed-budget mode
pub const MIN_LEAVE_BUDGET: u8 = 1;
/// Largest budget accepted in fixed-budget mode (inclusive)
pub const MAX_LEAVE_BUDGET: u8 = 15;

/// A search window never spans more calendar months than this
pub const MAX_SPANNED_MONTHS: usize = 2;

/// Months of the following year searched after the current year
pub const DEFAULT_LOOKAHEAD_MONTHS: u8 = 4;
/// Upper limit for the lookahead window
pub const MAX_LOOKAHEAD_MONTHS: u8 = 12;

/// Month number for January
pub const JANUARY: u32 = 1;
/// Month number for December
pub const DECEMBER: u32 = 12;

/// Year-month separator of a month key (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
