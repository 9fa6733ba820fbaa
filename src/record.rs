//! Canonical record format for a single PIN grid
//!
//! Layout (ASCII): `<version>-<pattern>-<digits>`
//! - `version`: non-negative decimal integer
//! - `pattern`: one character per cell, row-major
//! - `digits`: one character per cell, row-major
//!
//! Fields are not delimited cell by cell, so every cell must render as a
//! single decimal character. Both boundaries enforce that width.

use crate::config::GridConfig;
use crate::error::{PinError, Result};
use crate::grid::Pattern;

/// Field separator
pub const SEPARATOR: u8 = b'-';

/// A validated, reconstructed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub version: u32,
    pub pattern: Pattern,
    /// Row-major digits, each in `0..=9`
    pub digits: Vec<u8>,
}

/// Encode markers and digits (both row-major) into a record
///
/// Any cell above 9 would widen its field, so it fails with
/// [`PinError::InvalidMarker`] or [`PinError::InvalidDigit`] instead.
pub(crate) fn encode(version: u32, markers: &[u8], digits: &[u8]) -> Result<Vec<u8>> {
    if let Some(&bad) = markers.iter().find(|&&m| m > 9) {
        return Err(PinError::InvalidMarker(bad));
    }
    if let Some(&bad) = digits.iter().find(|&&d| d > 9) {
        return Err(PinError::InvalidDigit(bad.into()));
    }

    let version = version.to_string();
    let mut out = Vec::with_capacity(version.len() + markers.len() + digits.len() + 2);
    out.extend_from_slice(version.as_bytes());
    out.push(SEPARATOR);
    out.extend(markers.iter().map(|&m| b'0' + m));
    out.push(SEPARATOR);
    out.extend(digits.iter().map(|&d| b'0' + d));
    Ok(out)
}

/// Split a record into `(version, pattern text, digit text)`
///
/// Only the field count and the version are checked; see [`decode`] for full
/// validation against a grid shape.
pub fn extract_data(raw: &[u8]) -> Result<(u32, String, String)> {
    let text = std::str::from_utf8(raw).map_err(|_| PinError::malformed("not valid UTF-8"))?;
    let parts: Vec<&str> = text.split(SEPARATOR as char).collect();
    let [version, pattern, digits] = parts.as_slice() else {
        return Err(PinError::malformed(format!(
            "expected 3 fields, found {}",
            parts.len()
        )));
    };
    // Digits only: `parse` would also take a leading `+`
    let invalid = || PinError::malformed(format!("invalid version {version:?}"));
    if version.is_empty() || !version.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let version = version.parse::<u32>().map_err(|_| invalid())?;
    Ok((version, pattern.to_string(), digits.to_string()))
}

/// Decode a record and rebuild its pattern and digits for the given grid shape
pub fn decode(config: &GridConfig, raw: &[u8]) -> Result<DecodedRecord> {
    let (version, pattern_text, digit_text) = extract_data(raw)?;
    let markers = parse_field("pattern", &pattern_text, config.cell_count())?;
    let digits = parse_field("digits", &digit_text, config.cell_count())?;
    Ok(DecodedRecord {
        version,
        pattern: Pattern::new(config.rows(), config.columns(), markers)?,
        digits,
    })
}

fn parse_field(name: &str, text: &str, expected: usize) -> Result<Vec<u8>> {
    if text.len() != expected {
        return Err(PinError::malformed(format!(
            "{name} field has {} characters, expected {expected}",
            text.len()
        )));
    }
    text.bytes()
        .map(|b| match b {
            b'0'..=b'9' => Ok(b - b'0'),
            _ => Err(PinError::malformed(format!(
                "{name} field contains non-digit {:?}",
                b as char
            ))),
        })
        .collect()
}
