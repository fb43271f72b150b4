//! Accelerometer samples and the normalized waveform built from them

use serde::{Deserialize, Serialize};

/// Column layout of an uploaded flight log.
///
/// The logging firmware changed format over time; the layout is inferred
/// from the column count unless the caller forces one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ColumnLayout {
    /// `raw, acceleration` - fixed sample interval
    RawAccel,
    /// `time, raw, acceleration` - interval from the first two timestamps
    TimeRawAccel,
    /// `index, time, raw, acceleration`
    IndexTimeRawAccel,
}

impl ColumnLayout {
    /// Infer the layout from the number of columns in a row.
    pub fn from_column_count(columns: usize) -> Option<Self> {
        match columns {
            2 => Some(Self::RawAccel),
            3 => Some(Self::TimeRawAccel),
            4 => Some(Self::IndexTimeRawAccel),
            _ => None,
        }
    }

    /// Number of fields a row must carry for this layout.
    pub fn column_count(self) -> usize {
        match self {
            Self::RawAccel => 2,
            Self::TimeRawAccel => 3,
            Self::IndexTimeRawAccel => 4,
        }
    }

    /// Whether rows carry their own timestamps.
    pub fn has_time(self) -> bool {
        !matches!(self, Self::RawAccel)
    }
}

impl std::fmt::Display for ColumnLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RawAccel => write!(f, "raw,accel"),
            Self::TimeRawAccel => write!(f, "time,raw,accel"),
            Self::IndexTimeRawAccel => write!(f, "index,time,raw,accel"),
        }
    }
}

/// One accelerometer reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    /// Position in the flight log (explicit index column when present)
    pub index: u64,
    /// Seconds since the start of the log
    pub time: f64,
    /// Raw sensor count as logged
    pub raw: f64,
    /// Acceleration in g
    pub acceleration: f64,
}

/// A single flight's acceleration series at a uniform sample interval.
///
/// Constructed once per uploaded file and never mutated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Waveform {
    samples: Vec<Sample>,
    sample_interval: f64,
    layout: ColumnLayout,
}

impl Waveform {
    /// Build a waveform from already-validated samples.
    ///
    /// The loader guarantees non-decreasing time, finite accelerations and a
    /// positive interval before calling this.
    pub(crate) fn new(samples: Vec<Sample>, sample_interval: f64, layout: ColumnLayout) -> Self {
        Self {
            samples,
            sample_interval,
            layout,
        }
    }

    /// Build a waveform directly from acceleration values at a fixed interval.
    ///
    /// Times are synthesized as `index * sample_interval`; raw counts mirror
    /// the acceleration. Returns `None` for a non-positive or non-finite
    /// interval or a non-finite acceleration.
    pub fn from_accelerations(accelerations: &[f64], sample_interval: f64) -> Option<Self> {
        if !sample_interval.is_finite() || sample_interval <= 0.0 {
            return None;
        }
        if accelerations.iter().any(|a| !a.is_finite()) {
            return None;
        }

        let samples = accelerations
            .iter()
            .enumerate()
            .map(|(i, &acceleration)| Sample {
                index: i as u64,
                time: i as f64 * sample_interval,
                raw: acceleration,
                acceleration,
            })
            .collect();

        Some(Self::new(samples, sample_interval, ColumnLayout::RawAccel))
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Time spacing between consecutive samples (seconds).
    pub fn sample_interval(&self) -> f64 {
        self.sample_interval
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Layout of the file this waveform was loaded from.
    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    pub fn sample_rate_hz(&self) -> f64 {
        1.0 / self.sample_interval
    }

    /// Span covered by the samples at the uniform interval.
    pub fn duration_s(&self) -> f64 {
        self.samples.len() as f64 * self.sample_interval
    }

    /// Acceleration series in g, in time order.
    pub fn accelerations(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.acceleration).collect()
    }

    /// Average acceleration (gravity bias plus any DC offset).
    pub fn mean_acceleration(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s.acceleration).sum::<f64>() / self.samples.len() as f64
    }

    /// RMS of the acceleration about its mean, i.e. vibration energy without DC.
    pub fn rms_acceleration(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mean = self.mean_acceleration();
        let sum_squares: f64 = self
            .samples
            .iter()
            .map(|s| (s.acceleration - mean).powi(2))
            .sum();
        (sum_squares / self.samples.len() as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_column_count() {
        assert_eq!(ColumnLayout::from_column_count(2), Some(ColumnLayout::RawAccel));
        assert_eq!(ColumnLayout::from_column_count(3), Some(ColumnLayout::TimeRawAccel));
        assert_eq!(
            ColumnLayout::from_column_count(4),
            Some(ColumnLayout::IndexTimeRawAccel)
        );
        assert_eq!(ColumnLayout::from_column_count(1), None);
        assert_eq!(ColumnLayout::from_column_count(5), None);
    }

    #[test]
    fn test_from_accelerations_synthesizes_time() {
        let wf = Waveform::from_accelerations(&[0.0, 1.0, -1.0, 0.5], 0.01).unwrap();
        assert_eq!(wf.sample_count(), 4);
        assert!((wf.samples()[3].time - 0.03).abs() < 1e-12);
        assert!((wf.sample_rate_hz() - 100.0).abs() < 1e-9);
        assert!((wf.duration_s() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_from_accelerations_rejects_bad_input() {
        assert!(Waveform::from_accelerations(&[0.0, 1.0], 0.0).is_none());
        assert!(Waveform::from_accelerations(&[0.0, 1.0], -0.01).is_none());
        assert!(Waveform::from_accelerations(&[0.0, f64::NAN], 0.01).is_none());
    }

    #[test]
    fn test_rms_excludes_gravity_bias() {
        // Square wave of ±0.5 g riding on 1 g of gravity
        let accel: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 1.5 } else { 0.5 }).collect();
        let wf = Waveform::from_accelerations(&accel, 0.01).unwrap();
        assert!((wf.mean_acceleration() - 1.0).abs() < 1e-12);
        assert!((wf.rms_acceleration() - 0.5).abs() < 1e-12);
    }
}
