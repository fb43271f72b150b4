//! Waveform loader
//!
//! Normalizes every supported flight-log layout into one canonical
//! [`Waveform`] so downstream stages never branch on input shape:
//!
//! | Columns | Layout                         | Sample interval               |
//! |---------|--------------------------------|-------------------------------|
//! | 2       | raw, acceleration              | configured default (0.01 s)   |
//! | 3       | time, raw, acceleration        | `time[1] - time[0]`           |
//! | 4       | index, time, raw, acceleration | `time[1] - time[0]`           |
//!
//! A zero timestamp-derived interval falls back to the configured default.
//! Logs longer than `max_samples` are truncated, never resampled.

use std::path::Path;
use tracing::{debug, warn};

use super::csv_rows::{parse_rows, CsvRow};
use super::LoadError;
use crate::config::{defaults, ConversionStrategy, LoaderConfig};
use crate::types::{ColumnLayout, Sample, Waveform};

/// Builds a [`Waveform`] from raw tabular input.
#[derive(Debug, Clone, Default)]
pub struct WaveformLoader {
    config: LoaderConfig,
    layout: Option<ColumnLayout>,
}

impl WaveformLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            layout: None,
        }
    }

    /// Force a column layout instead of inferring it from the column count.
    #[must_use]
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Read and normalize a CSV flight log from disk.
    pub fn load_file(&self, path: &Path) -> Result<Waveform, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(file = %path.display(), bytes = bytes.len(), "Read flight log");

        let contents = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            LoadError::malformed(line, "file is not valid UTF-8 text")
        })?;
        self.load_str(&contents)
    }

    /// Normalize CSV text (optionally with a header row).
    pub fn load_str(&self, input: &str) -> Result<Waveform, LoadError> {
        let parsed = parse_rows(input, self.config.max_samples)?;
        if parsed.dropped > 0 {
            warn!(
                kept = parsed.rows.len(),
                dropped = parsed.dropped,
                "Flight log exceeds {} samples, truncating",
                self.config.max_samples
            );
        }
        self.build(&parsed.rows)
    }

    /// Normalize rows of numeric fields that were already split.
    ///
    /// Row numbers in errors are 1-based positions in `rows`.
    pub fn load_rows(&self, rows: &[Vec<f64>]) -> Result<Waveform, LoadError> {
        if rows.len() > self.config.max_samples {
            warn!(
                kept = self.config.max_samples,
                dropped = rows.len() - self.config.max_samples,
                "Input exceeds {} samples, truncating",
                self.config.max_samples
            );
        }

        let mut csv_rows = Vec::with_capacity(rows.len().min(self.config.max_samples));
        for (i, fields) in rows.iter().take(self.config.max_samples).enumerate() {
            if let Some(col) = fields.iter().position(|v| !v.is_finite()) {
                return Err(LoadError::malformed(
                    i + 1,
                    format!("non-finite value in column {}", col + 1),
                ));
            }
            csv_rows.push(CsvRow {
                line: i + 1,
                fields: fields.clone(),
            });
        }

        self.build(&csv_rows)
    }

    fn build(&self, rows: &[CsvRow]) -> Result<Waveform, LoadError> {
        if rows.len() < defaults::MIN_SAMPLES {
            return Err(LoadError::TooFewSamples {
                needed: defaults::MIN_SAMPLES,
                available: rows.len(),
            });
        }

        let first = &rows[0];
        let layout = match self.layout {
            Some(layout) => layout,
            None => ColumnLayout::from_column_count(first.fields.len()).ok_or_else(|| {
                LoadError::UnsupportedLayout {
                    line: first.line,
                    columns: first.fields.len(),
                }
            })?,
        };

        let mut samples = Vec::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            let sample = self.to_sample(row, layout, position)?;
            if let Some(prev) = samples.last().map(|s: &Sample| s.time) {
                if sample.time < prev {
                    return Err(LoadError::malformed(
                        row.line,
                        format!("time went backwards ({} s after {prev} s)", sample.time),
                    ));
                }
            }
            samples.push(sample);
        }

        let sample_interval = self.sample_interval(&samples, layout);

        debug!(
            layout = %layout,
            samples = samples.len(),
            sample_interval,
            conversion = ?self.config.conversion,
            "Waveform loaded"
        );

        Ok(Waveform::new(samples, sample_interval, layout))
    }

    fn to_sample(
        &self,
        row: &CsvRow,
        layout: ColumnLayout,
        position: usize,
    ) -> Result<Sample, LoadError> {
        let f = &row.fields;
        if f.len() != layout.column_count() {
            return Err(LoadError::malformed(
                row.line,
                format!(
                    "layout {layout} needs {} columns, found {}",
                    layout.column_count(),
                    f.len()
                ),
            ));
        }

        let (index, time, raw, stored) = match layout {
            ColumnLayout::RawAccel => (
                position as u64,
                position as f64 * self.config.default_sample_interval_s,
                f[0],
                f[1],
            ),
            ColumnLayout::TimeRawAccel => (position as u64, f[0], f[1], f[2]),
            ColumnLayout::IndexTimeRawAccel => {
                let index = f[0];
                if index < 0.0 || index.fract() != 0.0 {
                    return Err(LoadError::malformed(
                        row.line,
                        format!("index {index} is not a non-negative integer"),
                    ));
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let index = index as u64;
                (index, f[1], f[2], f[3])
            }
        };

        let acceleration = match self.config.conversion {
            ConversionStrategy::TrustStored => stored,
            ConversionStrategy::Recompute => {
                (raw - self.config.zero_offset) / self.config.sensitivity
            }
        };
        if !acceleration.is_finite() {
            return Err(LoadError::malformed(
                row.line,
                format!("acceleration from raw count {raw} is not finite"),
            ));
        }

        Ok(Sample {
            index,
            time,
            raw,
            acceleration,
        })
    }

    fn sample_interval(&self, samples: &[Sample], layout: ColumnLayout) -> f64 {
        let default = self.config.default_sample_interval_s;
        if !layout.has_time() {
            return default;
        }

        let derived = samples[1].time - samples[0].time;
        if derived > 0.0 {
            derived
        } else {
            warn!(
                t0 = samples[0].time,
                t1 = samples[1].time,
                "Zero sample interval from timestamps, using default {default} s"
            );
            default
        }
    }
}
