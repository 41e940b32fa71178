//! Calibration overrides and the sources they are loaded from
//!
//! Overrides only ever touch the index window; the multiplier range is fixed.
//! Sources, lowest precedence first:
//! - `min.txt` / `max.txt` in a calibration directory, one number each
//! - a JSON overrides file: `{"index_min": 20.5, "index_max": 35.0}`
//! - explicit values set by the caller
//!
//! Layer them with `CalibrationOverrides::merge` and finish with `resolve`.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::bounds::{CalibrationBounds, DEFAULT_INDEX_MAX, DEFAULT_INDEX_MIN};
use crate::error::{CalibrationError, MultiplierError};

/// File holding the index's 5-year low
pub const MIN_FILE: &str = "min.txt";

/// File holding the index's 5-year high
pub const MAX_FILE: &str = "max.txt";

/// Optional replacements for the default index window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationOverrides {
    /// Override for the 5-year low
    #[serde(default)]
    pub index_min: Option<f64>,
    /// Override for the 5-year high
    #[serde(default)]
    pub index_max: Option<f64>,
}

impl CalibrationOverrides {
    pub fn new(index_min: Option<f64>, index_max: Option<f64>) -> Self {
        Self { index_min, index_max }
    }

    /// Load `min.txt` / `max.txt` from `dir`; a missing file leaves that side unset
    pub fn from_dir(dir: &Path) -> Result<Self, CalibrationError> {
        let overrides = Self {
            index_min: read_calibration_value(&dir.join(MIN_FILE))?,
            index_max: read_calibration_value(&dir.join(MAX_FILE))?,
        };
        debug!("calibration files in {}: {:?}", dir.display(), overrides);
        Ok(overrides)
    }

    /// Load overrides from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, CalibrationError> {
        let text = fs::read_to_string(path).map_err(|source| CalibrationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: Self = serde_json::from_str(&text).map_err(|source| CalibrationError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded calibration overrides from {}", path.display());
        Ok(overrides)
    }

    /// Layer `other` on top of `self`; values set in `other` win
    pub fn merge(self, other: Self) -> Self {
        Self {
            index_min: other.index_min.or(self.index_min),
            index_max: other.index_max.or(self.index_max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.index_min.is_none() && self.index_max.is_none()
    }

    /// Fill unset sides with the defaults and validate
    pub fn resolve(&self) -> Result<CalibrationBounds, MultiplierError> {
        let index_min = self.index_min.unwrap_or(DEFAULT_INDEX_MIN);
        let index_max = self.index_max.unwrap_or(DEFAULT_INDEX_MAX);
        if !self.is_empty() {
            info!("index window [{}, {}] (overridden)", index_min, index_max);
        }
        CalibrationBounds::with_index_window(index_min, index_max)
    }
}

/// Read one calibration number from a text file
///
/// Returns `Ok(None)` when the file does not exist. The text may be UTF-16 (with or
/// without a BOM; little-endian is assumed without one) or UTF-8. Surrounding
/// whitespace is ignored.
pub fn read_calibration_value(path: &Path) -> Result<Option<f64>, CalibrationError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(CalibrationError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let text = decode_text(&bytes).ok_or_else(|| CalibrationError::Decode {
        path: path.to_path_buf(),
    })?;
    let trimmed = text.trim();
    let value = trimmed.parse::<f64>().map_err(|source| CalibrationError::Parse {
        path: path.to_path_buf(),
        text: trimmed.to_string(),
        source,
    })?;

    info!("read {} from {}", value, path.display());
    Ok(Some(value))
}

fn decode_text(bytes: &[u8]) -> Option<String> {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).ok(),
        // BOM-less UTF-16 shows up as interleaved NULs in ASCII digits
        _ if bytes.len() % 2 == 0 && bytes.contains(&0) => decode_utf16(bytes, u16::from_le_bytes),
        _ => String::from_utf8(bytes.to_vec()).ok(),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    let chunks = bytes.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return None;
    }
    let units: Vec<u16> = chunks.map(|pair| unit([pair[0], pair[1]])).collect();
    String::from_utf16(&units).ok()
}
