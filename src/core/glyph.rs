//! # Glyph Table
//!
//! Seven-segment emulation on a 5-row by 3-column grid. A filled cell is
//! painted in ink, an empty one in the background colour. Each glyph cell
//! is two terminal columns wide so the digits look roughly square.

/// Rows in one glyph.
pub const GLYPH_ROWS: u16 = 5;
/// Logical columns in one glyph.
pub const GLYPH_COLS: u16 = 3;
/// Terminal columns per logical glyph column.
pub const CELL_WIDTH: u16 = 2;

/// Row-major cell masks for the digits 0 through 9.
static DIGITS: [[bool; 15]; 10] = {
    const X: bool = true;
    const O: bool = false;
    [
        [X, X, X, X, O, X, X, O, X, X, O, X, X, X, X], // 0
        [O, O, X, O, O, X, O, O, X, O, O, X, O, O, X], // 1
        [X, X, X, O, O, X, X, X, X, X, O, O, X, X, X], // 2
        [X, X, X, O, O, X, X, X, X, O, O, X, X, X, X], // 3
        [X, O, X, X, O, X, X, X, X, O, O, X, O, O, X], // 4
        [X, X, X, X, O, O, X, X, X, O, O, X, X, X, X], // 5
        [X, X, X, X, O, O, X, X, X, X, O, X, X, X, X], // 6
        [X, X, X, O, O, X, O, O, X, O, O, X, O, O, X], // 7
        [X, X, X, X, O, X, X, X, X, X, O, X, X, X, X], // 8
        [X, X, X, X, O, X, X, X, X, O, O, X, X, X, X], // 9
    ]
};

/// A digit's cell matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph(&'static [bool; 15]);

impl Glyph {
    /// Looks up the glyph for `digit`. Values above 9 wrap to their last
    /// decimal digit.
    pub fn for_digit(digit: u8) -> Self {
        Self(&DIGITS[usize::from(digit % 10)])
    }

    /// Whether the cell at (`row`, `col`) is part of the digit's segments.
    pub fn filled(&self, row: u16, col: u16) -> bool {
        if row >= GLYPH_ROWS || col >= GLYPH_COLS {
            return false;
        }
        self.0[usize::from(row * GLYPH_COLS + col)]
    }

    /// Iterates `(row, col, filled)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u16, u16, bool)> + '_ {
        (0..GLYPH_ROWS)
            .flat_map(|row| (0..GLYPH_COLS).map(move |col| (row, col)))
            .map(|(row, col)| (row, col, self.filled(row, col)))
    }
}
