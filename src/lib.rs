//! PINcredible - memorable PINs hidden in a grid of digits
//!
//! Core modules:
//! - `grid`: PIN table (digits + background pattern), fill and lookups
//! - `record`: Versioned text record for one table
//! - `random`: Secure digit source for completing a table
//! - `cipher`: Symmetric cipher sealing the saved collection
//! - `collection`: Encrypted set of records
//! - `config`: Grid dimensions and record version

pub mod cipher;
pub mod collection;
pub mod config;
pub mod error;
pub mod grid;
pub mod random;
pub mod record;

pub use cipher::{ChaChaCipher, CipherError, PinCipher};
pub use collection::PinCollection;
pub use config::GridConfig;
pub use error::{PinError, Result};
pub use grid::{Pattern, PinTable, UNSET};
pub use random::{DigitSource, SecureDigitSource};

/// Grid configuration constants
pub mod consts {
    /// Default grid rows
    pub const ROW_COUNT: usize = 7;
    /// Default grid columns
    pub const COLUMN_COUNT: usize = 7;
    /// Largest accepted row or column count
    pub const MAX_DIMENSION: usize = 64;
    /// Record format version written by this build
    pub const FORMAT_VERSION: u32 = 1;
    /// Distinct background styles a generated pattern draws from
    pub const MARKER_STYLES: u8 = 5;
}
