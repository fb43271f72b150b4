//! Signal processing module - spectrum and peak extraction for vibration analysis

mod fft;
mod peaks;

pub use fft::*;
pub use peaks::*;

use thiserror::Error;

/// Errors in signal processing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("Insufficient data: need {needed}, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Spectrum has no usable bins")]
    EmptySpectrum,

    #[error("Invalid sample interval: {0}")]
    InvalidSampleInterval(f64),
}
