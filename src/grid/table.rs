//! PIN table: the digit grid of one stored PIN plus its background pattern

use crate::config::GridConfig;
use crate::error::{PinError, Result};
use crate::random::{DigitSource, SecureDigitSource};
use crate::record;

use super::Pattern;

/// Sentinel for a cell nobody has chosen yet
pub const UNSET: i8 = -1;

/// One PIN entry
///
/// Digits are stored row-major. A table has no interior mutability; hand it
/// between threads by moving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinTable {
    config: GridConfig,
    digits: Vec<i8>,
    pattern: Pattern,
}

impl PinTable {
    /// Empty table (every cell unset) over the given pattern
    pub fn new(config: GridConfig, pattern: Pattern) -> Result<Self> {
        let shape = (config.rows(), config.columns());
        if (pattern.rows(), pattern.columns()) != shape {
            return Err(PinError::DimensionMismatch {
                expected: shape,
                actual: (pattern.rows(), pattern.columns()),
            });
        }
        Ok(Self {
            digits: vec![UNSET; config.cell_count()],
            config,
            pattern,
        })
    }

    /// Rebuild a table from an encoded record
    pub fn from_data(config: GridConfig, raw: &[u8]) -> Result<Self> {
        let decoded = record::decode(&config, raw)?;
        let mut table = Self::new(config.with_version(decoded.version), decoded.pattern)?;
        for (cell, digit) in table.digits.iter_mut().zip(decoded.digits) {
            *cell = digit as i8;
        }
        Ok(table)
    }

    /// Clear every digit back to unset; the pattern is kept
    pub fn reset(&mut self) {
        self.digits = vec![UNSET; self.config.cell_count()];
    }

    pub fn is_filled(&self) -> bool {
        !self.digits.contains(&UNSET)
    }

    /// Write a digit (or [`UNSET`]) into a cell
    pub fn put(&mut self, row: i32, column: i32, value: i8) -> Result<()> {
        let index = self.index(row, column)?;
        if !(UNSET..=9).contains(&value) {
            return Err(PinError::InvalidDigit(value.into()));
        }
        self.digits[index] = value;
        Ok(())
    }

    /// Text of a cell's digit; an unset cell reads as `"-1"`
    pub fn get(&self, row: i32, column: i32) -> Result<String> {
        let index = self.index(row, column)?;
        Ok(self.digits[index].to_string())
    }

    /// Pattern marker behind a cell
    pub fn get_background(&self, row: i32, column: i32) -> Result<u8> {
        let index = self.index(row, column)?;
        self.pattern
            .markers()
            .get(index)
            .copied()
            .ok_or(PinError::InvalidIndex { row, column })
    }

    /// Complete every unset cell with a secure random digit
    pub fn fill(&mut self) {
        let mut source = SecureDigitSource::new();
        // SecureDigitSource samples 0..10, so every draw is a valid digit
        for cell in self.digits.iter_mut().filter(|c| **c == UNSET) {
            *cell = source.next_digit() as i8;
        }
    }

    /// Complete every unset cell from `source`; set cells are never touched
    ///
    /// A draw outside `0..=9` fails with [`PinError::InvalidDigit`] and leaves
    /// the table unchanged.
    pub fn fill_with<S: DigitSource + ?Sized>(&mut self, source: &mut S) -> Result<()> {
        let unset = self.digits.iter().filter(|&&c| c == UNSET).count();
        let draws = (0..unset)
            .map(|_| match source.next_digit() {
                d @ 0..=9 => Ok(d as i8),
                d => Err(PinError::InvalidDigit(d.into())),
            })
            .collect::<Result<Vec<i8>>>()?;
        for (cell, digit) in self.digits.iter_mut().filter(|c| **c == UNSET).zip(draws) {
            *cell = digit;
        }
        Ok(())
    }

    /// Encoded record for this table
    ///
    /// Fails with [`PinError::IncompleteGrid`] until every cell is set, so the
    /// two-character sentinel can never break the fixed-width layout.
    pub fn get_data(&self) -> Result<Vec<u8>> {
        let digits = self
            .digits
            .iter()
            .map(|&d| u8::try_from(d).map_err(|_| PinError::IncompleteGrid))
            .collect::<Result<Vec<u8>>>()?;
        record::encode(
            self.config.format_version(),
            self.pattern.markers(),
            &digits,
        )
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.config.rows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.config.columns()
    }

    fn index(&self, row: i32, column: i32) -> Result<usize> {
        let invalid = || PinError::InvalidIndex { row, column };
        let r = usize::try_from(row).map_err(|_| invalid())?;
        let c = usize::try_from(column).map_err(|_| invalid())?;
        if r >= self.rows() || c >= self.columns() {
            return Err(invalid());
        }
        Ok(r * self.columns() + c)
    }
}
