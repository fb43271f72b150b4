//! Frequency-domain view of a waveform

use serde::{Deserialize, Serialize};

/// One-sided magnitude spectrum of an acceleration series.
///
/// `frequencies` and `magnitudes` have the same length (`sample_count / 2`)
/// and correspond index-for-index. `frequencies[0]` is always 0 Hz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Spectrum {
    /// Frequency bins (Hz), ascending
    pub frequencies: Vec<f64>,
    /// Magnitude at each bin (g)
    pub magnitudes: Vec<f64>,
    /// Whether bin 0 was zeroed after the transform
    pub dc_removed: bool,
    /// Sample rate of the source waveform (Hz)
    pub sample_rate: f64,
    /// Number of time-domain samples that went into the transform
    pub sample_count: usize,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Hz per bin.
    pub fn frequency_resolution(&self) -> f64 {
        if self.sample_count == 0 {
            return 0.0;
        }
        self.sample_rate / self.sample_count as f64
    }

    /// Overall vibration level across all bins.
    pub fn rms(&self) -> f64 {
        if self.magnitudes.is_empty() {
            return 0.0;
        }
        let sum_squares: f64 = self.magnitudes.iter().map(|m| m * m).sum();
        (sum_squares / self.magnitudes.len() as f64).sqrt()
    }

    /// (frequency, magnitude) pairs for plotting.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.frequencies
            .iter()
            .zip(self.magnitudes.iter())
            .map(|(&f, &m)| [f, m])
            .collect()
    }
}

/// Dominant non-DC component of a spectrum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Peak {
    /// Bin the peak was taken from
    pub bin: usize,
    /// Frequency (Hz)
    pub frequency: f64,
    /// Magnitude (g)
    pub magnitude: f64,
}

impl Peak {
    pub fn new(bin: usize, frequency: f64, magnitude: f64) -> Self {
        Self {
            bin,
            frequency,
            magnitude,
        }
    }
}

impl std::fmt::Display for Peak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} Hz @ {:.3} g", self.frequency, self.magnitude)
    }
}
