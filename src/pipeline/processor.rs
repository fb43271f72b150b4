//! Vibration Processing Pipeline
//!
//! Runs one flight log through every stage in order:
//!
//! ```text
//! CSV ──► WaveformLoader ──► SpectralAnalyzer ──► extract_peak ──► FailureClassifier
//!            Waveform            Spectrum            Peak              Diagnosis
//! ```
//!
//! Each stage's output is handed to the next and bundled into an
//! [`AnalysisReport`]. A failure at any stage stops the run; nothing is
//! partially reported.
//!
//! # Example
//!
//! ```ignore
//! use drone_vibe::config::AnalysisConfig;
//! use drone_vibe::pipeline::VibrationPipeline;
//!
//! let pipeline = VibrationPipeline::new(AnalysisConfig::load());
//! let report = pipeline.analyze_file(Path::new("VIBRATE.CSV"))?;
//! println!("{}", report.diagnosis.category);
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::acquisition::{LoadError, WaveformLoader};
use crate::config::AnalysisConfig;
use crate::diagnosis::FailureClassifier;
use crate::processing::{extract_peak, find_dominant_frequencies, ProcessingError, SpectralAnalyzer};
use crate::types::{ColumnLayout, Diagnosis, Peak, Spectrum, Waveform};

// ============================================================================
// Error Type
// ============================================================================

/// Any failure between reading a flight log and classifying it.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

// ============================================================================
// Report
// ============================================================================

/// Everything produced for one flight log.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub waveform: Waveform,
    pub spectrum: Spectrum,
    pub diagnosis: Diagnosis,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Strongest local maxima of the spectrum, for a secondary listing.
    pub fn dominant_frequencies(&self, n: usize) -> Vec<Peak> {
        find_dominant_frequencies(&self.spectrum, n)
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Load → spectrum → peak → classify.
#[derive(Debug, Clone, Default)]
pub struct VibrationPipeline {
    loader: WaveformLoader,
    analyzer: SpectralAnalyzer,
    classifier: FailureClassifier,
}

impl VibrationPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            analyzer: SpectralAnalyzer::from(&config.spectrum),
            loader: WaveformLoader::new(config.loader),
            classifier: FailureClassifier::new(config.classifier),
        }
    }

    /// Force the input column layout instead of inferring it.
    #[must_use]
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.loader = self.loader.with_layout(layout);
        self
    }

    pub fn classifier(&self) -> &FailureClassifier {
        &self.classifier
    }

    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisReport, PipelineError> {
        let waveform = self.loader.load_file(path)?;
        self.analyze_waveform(waveform)
    }

    pub fn analyze_str(&self, input: &str) -> Result<AnalysisReport, PipelineError> {
        let waveform = self.loader.load_str(input)?;
        self.analyze_waveform(waveform)
    }

    pub fn analyze_rows(&self, rows: &[Vec<f64>]) -> Result<AnalysisReport, PipelineError> {
        let waveform = self.loader.load_rows(rows)?;
        self.analyze_waveform(waveform)
    }

    /// Run the spectral and classification stages on a loaded waveform.
    pub fn analyze_waveform(&self, waveform: Waveform) -> Result<AnalysisReport, PipelineError> {
        let spectrum = self.analyzer.analyze(&waveform)?;
        let peak = extract_peak(&spectrum)?;
        let diagnosis = self.classifier.classify(&peak);

        info!(
            samples = waveform.sample_count(),
            sample_rate_hz = waveform.sample_rate_hz(),
            peak = %peak,
            category = %diagnosis.category,
            "Flight analyzed"
        );

        Ok(AnalysisReport {
            waveform,
            spectrum,
            diagnosis,
            analyzed_at: Utc::now(),
        })
    }
}
