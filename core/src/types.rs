/// Whole seconds, used for time limits and countdown values.
pub type Seconds = u32;

/// Running score of a session.
pub type Score = u32;

/// Number of slots in the cell grid, enough for the largest tier.
pub const GRID_CELLS: usize = 9;
