//! Shared data structures for the vibration diagnostics pipeline
//!
//! Each stage owns its output until it hands it to the next:
//! - Waveform (acquisition output: uniform time-indexed acceleration)
//! - Spectrum (processing output: one-sided magnitude spectrum)
//! - Peak (dominant non-DC component of a spectrum)
//! - Diagnosis (classifier output: failure category + the peak that drove it)

mod waveform;
mod spectrum;
mod diagnosis;

pub use waveform::*;
pub use spectrum::*;
pub use diagnosis::*;
