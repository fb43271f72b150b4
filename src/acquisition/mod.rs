//! Flight log acquisition module
//!
//! Turns uploaded accelerometer logs (comma-separated numeric rows) into a
//! uniform [`Waveform`](crate::types::Waveform), whatever column layout the
//! logger firmware wrote.

mod csv_rows;
mod waveform_loader;

pub use csv_rows::{parse_rows, CsvRow, ParsedRows};
pub use waveform_loader::WaveformLoader;

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors while turning raw rows into a waveform.
///
/// Everything except `Io` means the input itself is unusable; retrying the
/// same file cannot succeed.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("Unsupported column layout at line {line}: {columns} columns (expected 2, 3 or 4)")]
    UnsupportedLayout { line: usize, columns: usize },

    #[error("Too few samples: need {needed}, have {available}")]
    TooFewSamples { needed: usize, available: usize },
}

impl LoadError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    /// True for every failure caused by the content of the input.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}
