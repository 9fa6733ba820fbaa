//! PIN grid model
//!
//! A PIN is a fixed-size grid of digits with a parallel grid of background
//! markers. Dimensions come from [`GridConfig`](crate::config::GridConfig).

pub mod pattern;
pub mod table;

pub use pattern::{MAX_MARKER, Pattern};
pub use table::{PinTable, UNSET};
