//! Cell coordinate type and column letter conversion
//!
//! VisiCalc dumps address cells with column letters and a 1-based row
//! number (`A1`, `BK254`). The document model keys its grid by the decoded
//! integer pair, so both directions of the base-26 conversion live here.

use crate::error::{Error, Result};
use std::fmt;

/// A cell coordinate as a pair of 1-based indices
///
/// Column 1 is `A`, column 26 is `Z`, column 27 is `AA`. Rows are kept
/// exactly as the worksheet numbers them, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// Column index (1-based, A=1)
    pub col: u32,
    /// Row index (1-based)
    pub row: u32,
}

impl CellCoord {
    /// Create a coordinate from 1-based indices
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Decode a coordinate from column letters and row digits as they
    /// appear in a dump (e.g. `"AA"`, `"12"`)
    pub fn from_parts(letters: &str, row: &str) -> Result<Self> {
        let col = letters_to_column(letters)?;
        let row: u32 = row
            .parse()
            .map_err(|_| Error::InvalidRow(row.to_string()))?;
        if row == 0 {
            return Err(Error::InvalidRow(row.to_string()));
        }
        Ok(Self { col, row })
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_to_letters(self.col), self.row)
    }
}

/// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, ...)
pub fn column_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = col;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27, ...)
///
/// Case-insensitive; the letters are positional base-26 digits.
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidColumn("empty column letters".into()));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidColumn(letters.to_string()));
        }
        col = col
            .checked_mul(26)
            .and_then(|n| n.checked_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1))
            .ok_or_else(|| Error::InvalidColumn(letters.to_string()))?;
    }

    Ok(col)
}
