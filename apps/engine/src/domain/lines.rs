//! Bitmask line detection for 5x5 bingo cards.
//!
//! A card is 25 cells in row-major order. The claim mask is a 25-bit integer
//! where bit `i` is set iff the number in cell `i` has been claimed. The
//! twelve winning patterns (5 rows, 5 columns, 2 diagonals) are a fixed
//! table of constants, so counting completed lines is twelve AND/compare
//! operations regardless of how many numbers are claimed.

use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

pub const GRID_SIZE: usize = 5;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;
pub const LINE_COUNT: usize = 12;

/// One of the twelve winning lines on a 5x5 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Row(u8),
    Col(u8),
    MainDiagonal,
    AntiDiagonal,
}

impl Line {
    /// Canonical name: `row-N`, `col-N`, `diagonal-main`, `diagonal-anti`.
    pub fn name(&self) -> String {
        match self {
            Line::Row(r) => format!("row-{r}"),
            Line::Col(c) => format!("col-{c}"),
            Line::MainDiagonal => "diagonal-main".to_string(),
            Line::AntiDiagonal => "diagonal-anti".to_string(),
        }
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.name())
    }
}

const fn row_pattern(r: u8) -> u32 {
    0b11111 << (GRID_SIZE as u8 * r)
}

const fn col_pattern(c: u8) -> u32 {
    // bits c, c+5, c+10, c+15, c+20
    0b00001_00001_00001_00001_00001 << c
}

// cells (0,0)..(4,4): bits 0, 6, 12, 18, 24
const MAIN_DIAGONAL_PATTERN: u32 = 1 | (1 << 6) | (1 << 12) | (1 << 18) | (1 << 24);
// cells (0,4)..(4,0): bits 4, 8, 12, 16, 20
const ANTI_DIAGONAL_PATTERN: u32 = (1 << 4) | (1 << 8) | (1 << 12) | (1 << 16) | (1 << 20);

/// The twelve canonical line patterns, computed once at compile time.
pub const LINE_PATTERNS: [(Line, u32); LINE_COUNT] = [
    (Line::Row(0), row_pattern(0)),
    (Line::Row(1), row_pattern(1)),
    (Line::Row(2), row_pattern(2)),
    (Line::Row(3), row_pattern(3)),
    (Line::Row(4), row_pattern(4)),
    (Line::Col(0), col_pattern(0)),
    (Line::Col(1), col_pattern(1)),
    (Line::Col(2), col_pattern(2)),
    (Line::Col(3), col_pattern(3)),
    (Line::Col(4), col_pattern(4)),
    (Line::MainDiagonal, MAIN_DIAGONAL_PATTERN),
    (Line::AntiDiagonal, ANTI_DIAGONAL_PATTERN),
];

/// Completed lines for one mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSummary {
    pub count: u8,
    pub lines: Vec<Line>,
}

impl LineSummary {
    pub fn line_names(&self) -> Vec<String> {
        self.lines.iter().map(Line::name).collect()
    }
}

/// Build the 25-bit claim mask: bit `i` set iff `cells[i]` is claimed.
pub fn build_mask(cells: &[i32; CELL_COUNT], claimed: &HashSet<i32>) -> u32 {
    let mut mask = 0u32;
    for (i, cell) in cells.iter().enumerate() {
        if claimed.contains(cell) {
            mask |= 1 << i;
        }
    }
    mask
}

/// Count completed lines in a mask. Constant time: twelve pattern tests.
pub fn count_lines(mask: u32) -> LineSummary {
    let mut lines = Vec::new();
    for (line, pattern) in LINE_PATTERNS {
        if mask & pattern == pattern {
            lines.push(line);
        }
    }
    LineSummary {
        count: lines.len() as u8,
        lines,
    }
}
