//! Failure diagnosis module
//!
//! Maps a spectrum's dominant peak to a mechanical failure category using
//! an amplitude floor and an ordered table of frequency bands.
//!
//! ## Default bands
//!
//! | Peak frequency | Category        |
//! |----------------|-----------------|
//! | (0, 5] Hz      | NORMAL          |
//! | (5, 10] Hz     | PROP_IMBALANCE  |
//! | (10, 20] Hz    | SHAFT_ISSUE     |
//! | > 20 Hz        | BEARING_FAILURE |
//!
//! Any peak below the amplitude floor (0.2 g) is NORMAL regardless of
//! frequency.

mod classifier;

pub use classifier::{FailureClassifier, ReferenceRow};

use serde::{Deserialize, Serialize};

use crate::types::FailureCategory;

/// Half-open frequency range `(lower_hz, upper_hz]` mapped to a category.
///
/// `upper_hz = None` makes the band unbounded above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    pub lower_hz: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_hz: Option<f64>,
    pub category: FailureCategory,
}

impl FrequencyBand {
    pub fn new(lower_hz: f64, upper_hz: Option<f64>, category: FailureCategory) -> Self {
        Self {
            lower_hz,
            upper_hz,
            category,
        }
    }

    /// Whether `frequency` lies in `(lower_hz, upper_hz]`.
    pub fn contains(&self, frequency: f64) -> bool {
        frequency > self.lower_hz && self.upper_hz.map_or(true, |upper| frequency <= upper)
    }

    /// Human-readable range, e.g. `5-10 Hz` or `> 20 Hz`.
    pub fn range_label(&self) -> String {
        match self.upper_hz {
            Some(upper) => format!("{}-{} Hz", self.lower_hz, upper),
            None => format!("> {} Hz", self.lower_hz),
        }
    }
}
