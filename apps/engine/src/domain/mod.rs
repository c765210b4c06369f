//! Pure game logic: no I/O, no clock, no store.

pub mod cards;
pub mod lines;
pub mod month;

pub use cards::card_cells;
pub use lines::{build_mask, count_lines, Line, LineSummary, CELL_COUNT, LINE_PATTERNS};
pub use month::{month_floor, next_month, prior_month_range};
