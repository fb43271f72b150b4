//! Spectrum computation using rustfft
//!
//! One-sided magnitude spectrum of a flight's acceleration series.
//!
//! # Scaling
//!
//! For `N` samples at interval `T`, bin `k` (for `k < N/2`) sits at
//! `k / (N * T)` Hz and has magnitude `(2 / N) * |X[k]|`. The factor of two
//! folds the discarded upper half of a real signal's transform back in, so a
//! sinusoid of amplitude `A` on a bin centre reads as `A` g.
//!
//! The transform runs over exactly `N` points; there is no zero-padding and
//! no windowing.
//!
//! # Example
//!
//! ```ignore
//! use drone_vibe::processing::SpectralAnalyzer;
//!
//! let spectrum = SpectralAnalyzer::new(true).analyze(&waveform)?;
//! ```

use rustfft::{num_complex::Complex, FftPlanner};

use super::ProcessingError;
use crate::config::{defaults, SpectrumConfig};
use crate::types::{Spectrum, Waveform};

// ============================================================================
// Spectral Analyzer
// ============================================================================

/// Computes the one-sided magnitude spectrum of a [`Waveform`].
#[derive(Debug, Clone, Copy)]
pub struct SpectralAnalyzer {
    remove_dc: bool,
}

impl Default for SpectralAnalyzer {
    fn default() -> Self {
        Self { remove_dc: true }
    }
}

impl From<&SpectrumConfig> for SpectralAnalyzer {
    fn from(config: &SpectrumConfig) -> Self {
        Self::new(config.remove_dc)
    }
}

impl SpectralAnalyzer {
    /// Create an analyzer; `remove_dc` zeroes bin 0 after the transform.
    pub fn new(remove_dc: bool) -> Self {
        Self { remove_dc }
    }

    /// Compute the spectrum of a waveform's acceleration series.
    pub fn analyze(&self, waveform: &Waveform) -> Result<Spectrum, ProcessingError> {
        compute_spectrum(
            &waveform.accelerations(),
            waveform.sample_interval(),
            self.remove_dc,
        )
    }
}

// ============================================================================
// Standalone Functions
// ============================================================================

/// Compute the one-sided magnitude spectrum of time-domain samples.
///
/// # Arguments
/// * `samples` - Acceleration values (g), uniformly spaced
/// * `sample_interval` - Spacing between samples (seconds)
/// * `remove_dc` - Zero bin 0 (average acceleration / gravity bias)
///
/// # Returns
/// [`Spectrum`] with `samples.len() / 2` bins
pub fn compute_spectrum(
    samples: &[f64],
    sample_interval: f64,
    remove_dc: bool,
) -> Result<Spectrum, ProcessingError> {
    if samples.len() < defaults::MIN_SAMPLES {
        return Err(ProcessingError::InsufficientData {
            needed: defaults::MIN_SAMPLES,
            available: samples.len(),
        });
    }

    if !sample_interval.is_finite() || sample_interval <= 0.0 {
        return Err(ProcessingError::InvalidSampleInterval(sample_interval));
    }

    let n = samples.len();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);

    // Convert to complex
    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&x| Complex::new(x, 0.0)).collect();

    // Compute FFT in-place
    fft.process(&mut buffer);

    let n_bins = n / 2;
    let resolution = 1.0 / (n as f64 * sample_interval);
    let scale = 2.0 / n as f64;

    let frequencies: Vec<f64> = (0..n_bins).map(|k| k as f64 * resolution).collect();
    let mut magnitudes: Vec<f64> = buffer
        .iter()
        .take(n_bins)
        .map(|c| c.norm() * scale)
        .collect();

    if remove_dc {
        if let Some(dc) = magnitudes.first_mut() {
            tracing::trace!(dc_magnitude = *dc, "Removing DC component");
            *dc = 0.0;
        }
    }

    tracing::debug!(
        samples = n,
        bins = n_bins,
        resolution_hz = resolution,
        remove_dc,
        "Spectrum computed"
    );

    Ok(Spectrum {
        frequencies,
        magnitudes,
        dc_removed: remove_dc,
        sample_rate: 1.0 / sample_interval,
        sample_count: n,
    })
}

// ============================================================================
// Tests
// ============================================================================
