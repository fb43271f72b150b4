//! Failure classifier - amplitude floor followed by a band lookup

use serde::Serialize;
use tracing::debug;

use super::FrequencyBand;
use crate::config::ClassifierConfig;
use crate::types::{Diagnosis, FailureCategory, Peak};

/// One line of the diagnostic reference shown next to a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub range: String,
    pub category: FailureCategory,
    pub label: &'static str,
    pub advice: &'static str,
}

/// Maps a spectrum peak to a [`FailureCategory`].
///
/// Stateless apart from its policy; classifying the same peak twice always
/// gives the same category.
#[derive(Debug, Clone, Default)]
pub struct FailureClassifier {
    config: ClassifierConfig,
}

impl FailureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a peak.
    ///
    /// A peak with no energy, or one below the amplitude floor, is NORMAL
    /// whatever its frequency. Otherwise the first band containing the peak
    /// frequency decides; a frequency outside every band is ANOMALOUS.
    pub fn classify(&self, peak: &Peak) -> Diagnosis {
        let silent = peak.magnitude <= 0.0;
        let category = if silent || peak.magnitude < self.config.amplitude_floor_g {
            FailureCategory::Normal
        } else {
            self.band_for(peak.frequency)
                .map_or(FailureCategory::Anomalous, |band| band.category)
        };

        debug!(
            frequency_hz = peak.frequency,
            magnitude_g = peak.magnitude,
            category = ?category,
            "Peak classified"
        );

        Diagnosis {
            category,
            peak: *peak,
        }
    }

    /// First configured band containing `frequency`.
    pub fn band_for(&self, frequency: f64) -> Option<&FrequencyBand> {
        self.config.bands.iter().find(|band| band.contains(frequency))
    }

    /// Configured bands as presentable rows, lowest frequency first.
    pub fn reference_guide(&self) -> Vec<ReferenceRow> {
        self.config
            .bands
            .iter()
            .map(|band| ReferenceRow {
                range: band.range_label(),
                category: band.category,
                label: band.category.label(),
                advice: band.category.advice(),
            })
            .collect()
    }
}
