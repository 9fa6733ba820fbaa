//! Grid configuration
//!
//! Injected into both the grid model and the record codec so the grid
//! dimensions are a parameter rather than a global.

use serde::{Deserialize, Serialize};

use crate::consts::{COLUMN_COUNT, FORMAT_VERSION, MAX_DIMENSION, ROW_COUNT};
use crate::error::{PinError, Result};

/// Grid shape and the format version stamped on every encoded record
///
/// Both sides are always within `1..=MAX_DIMENSION`, so `cell_count` cannot
/// overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGridConfig")]
pub struct GridConfig {
    rows: usize,
    columns: usize,
    format_version: u32,
}

/// Unchecked wire form; missing fields fall back to defaults
#[derive(Deserialize)]
#[serde(default)]
struct RawGridConfig {
    rows: usize,
    columns: usize,
    format_version: u32,
}

impl Default for RawGridConfig {
    fn default() -> Self {
        Self {
            rows: ROW_COUNT,
            columns: COLUMN_COUNT,
            format_version: FORMAT_VERSION,
        }
    }
}

impl TryFrom<RawGridConfig> for GridConfig {
    type Error = PinError;

    fn try_from(raw: RawGridConfig) -> Result<Self> {
        Ok(Self::new(raw.rows, raw.columns)?.with_version(raw.format_version))
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: ROW_COUNT,
            columns: COLUMN_COUNT,
            format_version: FORMAT_VERSION,
        }
    }
}

impl GridConfig {
    /// Shape with the default record version; each side must be `1..=MAX_DIMENSION`
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        let valid = 1..=MAX_DIMENSION;
        if !valid.contains(&rows) || !valid.contains(&columns) {
            return Err(PinError::InvalidShape {
                rows,
                columns,
                max: MAX_DIMENSION,
            });
        }
        Ok(Self {
            rows,
            columns,
            format_version: FORMAT_VERSION,
        })
    }

    /// Same shape, different record version
    pub fn with_version(mut self, format_version: u32) -> Self {
        self.format_version = format_version;
        self
    }

    /// Rows in both the digit and the pattern grid
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Columns in both the digit and the pattern grid
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Version written as the first field of each record
    #[inline]
    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    /// Cells per grid (and characters per flattened record field)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Parse a configuration from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_seven_by_seven() {
        let config = GridConfig::default();
        assert_eq!(config.rows(), 7);
        assert_eq!(config.columns(), 7);
        assert_eq!(config.cell_count(), 49);
        assert_eq!(config.format_version(), FORMAT_VERSION);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GridConfig::from_json(r#"{"rows": 2}"#).unwrap();
        assert_eq!(config.rows(), 2);
        assert_eq!(config.columns(), COLUMN_COUNT);
        assert_eq!(config.format_version(), FORMAT_VERSION);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GridConfig::new(3, 4).unwrap().with_version(42);
        let json = config.to_json().unwrap();
        assert_eq!(GridConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(GridConfig::from_json("{rows: two}").is_err());
    }

    #[test]
    fn test_new_rejects_empty_and_oversized_shapes() {
        for (rows, columns) in [(0, 7), (7, 0), (MAX_DIMENSION + 1, 1), (usize::MAX, 2)] {
            assert!(
                matches!(
                    GridConfig::new(rows, columns),
                    Err(PinError::InvalidShape { .. })
                ),
                "{rows}x{columns} should be rejected"
            );
        }
        let largest = GridConfig::new(MAX_DIMENSION, MAX_DIMENSION).unwrap();
        assert_eq!(largest.cell_count(), MAX_DIMENSION * MAX_DIMENSION);
    }

    #[test]
    fn test_json_with_overflowing_shape_is_error() {
        let json = format!(r#"{{"rows": {}, "columns": 2}}"#, usize::MAX);
        assert!(matches!(
            GridConfig::from_json(&json),
            Err(PinError::Serialization(_))
        ));
        assert!(GridConfig::from_json(r#"{"rows": 0}"#).is_err());
    }
}
