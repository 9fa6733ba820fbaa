//! Error types shared by the grid model, record codec and collection

use thiserror::Error;

use crate::cipher::CipherError;

/// Everything that can go wrong while building, encoding or storing a PIN grid
#[derive(Debug, Error)]
pub enum PinError {
    #[error("invalid cell index ({row}, {column})")]
    InvalidIndex { row: i32, column: i32 },
    #[error("invalid digit {0}, expected -1 or 0..=9")]
    InvalidDigit(i32),
    #[error("invalid pattern marker {0}, expected 0..=9")]
    InvalidMarker(u8),
    #[error("invalid grid shape {rows}x{columns}, each side must be 1..={max}")]
    InvalidShape {
        rows: usize,
        columns: usize,
        max: usize,
    },
    #[error("pattern has {actual} markers, expected {expected}")]
    MarkerCount { expected: usize, actual: usize },
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("grid still contains unset cells")]
    IncompleteGrid,
    #[error("malformed record: {0}")]
    MalformedRecord(String),
    #[error(transparent)]
    EnDecryption(#[from] CipherError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PinError>;

impl PinError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        PinError::MalformedRecord(reason.into())
    }
}
