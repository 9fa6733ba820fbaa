//! Background pattern laid over a PIN grid
//!
//! A pattern marker only identifies a cell style; it carries no secret. Each
//! marker must render as exactly one decimal character in a record.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::consts::{MARKER_STYLES, MAX_DIMENSION};
use crate::error::{PinError, Result};

/// Largest marker value that still encodes as a single character
pub const MAX_MARKER: u8 = 9;

/// Row-major grid of style markers
///
/// `markers.len() == rows * columns` and every marker is at most
/// [`MAX_MARKER`]; deserialization goes through [`Pattern::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPattern")]
pub struct Pattern {
    rows: usize,
    columns: usize,
    markers: Vec<u8>,
}

#[derive(Deserialize)]
struct RawPattern {
    rows: usize,
    columns: usize,
    markers: Vec<u8>,
}

impl TryFrom<RawPattern> for Pattern {
    type Error = PinError;

    fn try_from(raw: RawPattern) -> Result<Self> {
        Self::new(raw.rows, raw.columns, raw.markers)
    }
}

impl Pattern {
    /// Build from row-major markers
    pub fn new(rows: usize, columns: usize, markers: Vec<u8>) -> Result<Self> {
        let Some(expected) = rows.checked_mul(columns) else {
            return Err(PinError::InvalidShape {
                rows,
                columns,
                max: MAX_DIMENSION,
            });
        };
        if markers.len() != expected {
            return Err(PinError::MarkerCount {
                expected,
                actual: markers.len(),
            });
        }
        if let Some(&bad) = markers.iter().find(|&&m| m > MAX_MARKER) {
            return Err(PinError::InvalidMarker(bad));
        }
        Ok(Self {
            rows,
            columns,
            markers,
        })
    }

    /// Build from nested rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let row_count = rows.len();
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(ragged) = rows.iter().find(|r| r.len() != columns) {
            return Err(PinError::DimensionMismatch {
                expected: (row_count, columns),
                actual: (row_count, ragged.len()),
            });
        }
        Self::new(row_count, columns, rows.into_iter().flatten().collect())
    }

    /// Random layout with markers drawn uniformly from `0..MARKER_STYLES`
    pub fn generate<R: Rng + ?Sized>(config: &GridConfig, rng: &mut R) -> Self {
        let markers = (0..config.cell_count())
            .map(|_| rng.random_range(0..MARKER_STYLES))
            .collect();
        Self {
            rows: config.rows(),
            columns: config.columns(),
            markers,
        }
    }

    /// Reproducible layout for a given seed
    pub fn from_seed(config: &GridConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        Self::generate(config, &mut rng)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Marker at a cell, `None` outside the grid
    pub fn get(&self, row: usize, column: usize) -> Option<u8> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.markers.get(row * self.columns + column).copied()
    }

    /// Row-major markers
    pub fn markers(&self) -> &[u8] {
        &self.markers
    }
}
