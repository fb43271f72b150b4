//! Analysis pipeline module
//!
//! ```text
//! STAGE 1: Load     (CSV → Waveform, layout normalized)
//! STAGE 2: Spectrum (Waveform → one-sided magnitude Spectrum)
//! STAGE 3: Peak     (Spectrum → dominant non-DC Peak)
//! STAGE 4: Classify (Peak → Diagnosis)
//! ```
//!
//! Stages run strictly in order; each consumes only the previous stage's
//! output.

mod processor;
mod session;

pub use processor::{AnalysisReport, PipelineError, VibrationPipeline};
pub use session::AnalysisSession;
