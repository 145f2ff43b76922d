//! Cell coordinates and the A1 address codec

use crate::error::{Error, Result};
use crate::MAX_COLS;
use std::fmt;
use std::str::FromStr;

/// A cell coordinate (0-based row and column)
///
/// Columns map to letter sequences using a bijective base-26 numeral system:
/// there is no "zero" digit, so column 0 is "A", column 25 is "Z", and column
/// 26 is "AA" (not "A0"). Rows display 1-based in A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., Z=25, AA=26)
    pub col: u32,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, 701 = ZZ)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col + 1; // bijective digits are 1-based

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to an index (A = 0, Z = 25, AA = 26)
    ///
    /// Case-insensitive. Fails with [`Error::InvalidCoordinate`] on empty or
    /// non-letter input, or when the letters exceed the supported column range.
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidCoordinate("empty column letters".into()));
        }

        let mut col: u64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidCoordinate(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);
            if col > MAX_COLS as u64 {
                return Err(Error::InvalidCoordinate(format!(
                    "column '{}' out of range",
                    letters
                )));
            }
        }

        Ok((col - 1) as u32)
    }

    /// Parse an A1-style address
    ///
    /// # Examples
    /// ```
    /// use ledger_sheets_core::Coord;
    ///
    /// let c = Coord::parse("A1").unwrap();
    /// assert_eq!(c, Coord::new(0, 0));
    ///
    /// let c = Coord::parse("AA12").unwrap();
    /// assert_eq!(c, Coord::new(11, 26));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidCoordinate("empty address".into()));
        }

        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| Error::InvalidCoordinate(format!("no row number in '{}'", s)))?;

        if split == 0 {
            return Err(Error::InvalidCoordinate(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(&s[..split])?;

        let row: u32 = s[split..]
            .parse()
            .map_err(|_| Error::InvalidCoordinate(format!("invalid row number in '{}'", s)))?;

        // Rows are 1-based in A1 notation
        if row == 0 {
            return Err(Error::InvalidCoordinate(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self::new(row - 1, col))
    }

    /// Format as an A1-style address
    pub fn to_a1(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

impl FromStr for Coord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
