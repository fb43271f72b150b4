//! drone-vibe: Drone Vibration Diagnostics
//!
//! Turns an accelerometer flight log into a mechanical failure diagnosis.
//!
//! ## Architecture
//!
//! - **Acquisition**: CSV flight logs in any supported column layout → `Waveform`
//! - **Processing**: one-sided magnitude spectrum and dominant peak
//! - **Diagnosis**: amplitude floor + frequency bands → `FailureCategory`
//! - **Pipeline**: runs the stages in order and holds the current report

pub mod acquisition;
pub mod config;
pub mod diagnosis;
pub mod pipeline;
pub mod processing;
pub mod types;

// Re-export configuration
pub use config::AnalysisConfig;

// Re-export commonly used types
pub use types::{ColumnLayout, Diagnosis, FailureCategory, Peak, Sample, Spectrum, Waveform};

// Re-export stage entry points
pub use acquisition::{LoadError, WaveformLoader};
pub use diagnosis::{FailureClassifier, FrequencyBand};
pub use pipeline::{AnalysisReport, AnalysisSession, PipelineError, VibrationPipeline};
pub use processing::{extract_peak, ProcessingError, SpectralAnalyzer};
