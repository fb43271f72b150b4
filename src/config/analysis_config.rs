//! Analysis Configuration - loader, spectrum and classifier tunables as TOML values
//!
//! Every constant the pipeline depends on is a field in this module. Each
//! struct implements `Default` with the reference policy from
//! [`super::defaults`], so an absent or empty config file changes nothing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::diagnosis::FrequencyBand;
use crate::types::FailureCategory;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a diagnostics run.
///
/// Load with `AnalysisConfig::load()` which searches:
/// 1. `$DRONE_VIBE_CONFIG` env var
/// 2. `./drone_vibe.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// CSV ingestion and raw-count conversion
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Spectral transform options
    #[serde(default)]
    pub spectrum: SpectrumConfig,

    /// Failure bands and amplitude floor
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl AnalysisConfig {
    /// Load configuration using the standard search order:
    /// 1. `$DRONE_VIBE_CONFIG` environment variable
    /// 2. `./drone_vibe.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded analysis config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./drone_vibe.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded analysis config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to a file, e.g. to seed a tunable copy of the defaults.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Analysis config saved");
        Ok(())
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Intervals and calibration constants must be finite, interval > 0
    /// - `max_samples` must allow at least two samples
    /// - Bands must be non-empty, ascending and non-overlapping
    /// - Only the last band may be unbounded
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let l = &self.loader;
        if !l.default_sample_interval_s.is_finite() || l.default_sample_interval_s <= 0.0 {
            errors.push(format!(
                "loader.default_sample_interval_s must be a finite value > 0 (got {})",
                l.default_sample_interval_s
            ));
        }
        if l.max_samples < defaults::MIN_SAMPLES {
            errors.push(format!(
                "loader.max_samples must be >= {} (got {})",
                defaults::MIN_SAMPLES,
                l.max_samples
            ));
        }
        if !l.zero_offset.is_finite() {
            errors.push(format!("loader.zero_offset must be finite (got {})", l.zero_offset));
        }
        if !l.sensitivity.is_finite() || l.sensitivity == 0.0 {
            errors.push(format!(
                "loader.sensitivity must be finite and non-zero (got {})",
                l.sensitivity
            ));
        }

        let c = &self.classifier;
        if !c.amplitude_floor_g.is_finite() || c.amplitude_floor_g < 0.0 {
            errors.push(format!(
                "classifier.amplitude_floor_g must be a finite value >= 0 (got {})",
                c.amplitude_floor_g
            ));
        }
        Self::check_bands(&c.bands, &mut errors);

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_bands(bands: &[FrequencyBand], errors: &mut Vec<String>) {
        if bands.is_empty() {
            errors.push("classifier.bands must contain at least one band".to_string());
            return;
        }

        for (i, band) in bands.iter().enumerate() {
            let name = format!("classifier.bands[{i}]");
            // NaN comparisons silently pass, catch them explicitly
            if !band.lower_hz.is_finite() || band.lower_hz < 0.0 {
                errors.push(format!(
                    "{name}: lower_hz must be a finite value >= 0 (got {})",
                    band.lower_hz
                ));
                continue;
            }
            match band.upper_hz {
                Some(upper) if !upper.is_finite() || upper <= band.lower_hz => {
                    errors.push(format!(
                        "{name}: upper_hz ({upper}) must be finite and > lower_hz ({})",
                        band.lower_hz
                    ));
                }
                None if i + 1 != bands.len() => {
                    errors.push(format!("{name}: only the last band may omit upper_hz"));
                }
                _ => {}
            }
        }

        for (i, pair) in bands.windows(2).enumerate() {
            if let Some(upper) = pair[0].upper_hz {
                if upper > pair[1].lower_hz {
                    errors.push(format!(
                        "classifier.bands[{}] overlaps classifier.bands[{}] ({upper} Hz > {} Hz)",
                        i,
                        i + 1,
                        pair[1].lower_hz
                    ));
                } else if upper < pair[1].lower_hz {
                    warn!(
                        gap_from_hz = upper,
                        gap_to_hz = pair[1].lower_hz,
                        "Gap between classifier bands, peaks there classify as {}",
                        FailureCategory::Anomalous
                    );
                }
            }
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Loader
// ============================================================================

/// How the acceleration column is obtained from a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStrategy {
    /// Use the acceleration column exactly as logged
    #[default]
    TrustStored,
    /// Recompute `(raw - zero_offset) / sensitivity` from the raw count
    Recompute,
}

/// CSV ingestion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Interval for logs without timestamps, and the substitute for a zero
    /// timestamp-derived interval (seconds)
    #[serde(default = "default_sample_interval")]
    pub default_sample_interval_s: f64,

    /// Rows beyond this count are dropped
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,

    /// Trust the logged acceleration or recompute it from the raw count
    #[serde(default)]
    pub conversion: ConversionStrategy,

    /// Raw count at 0 g (recompute only)
    #[serde(default = "default_zero_offset")]
    pub zero_offset: f64,

    /// Raw counts per g (recompute only)
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
}

fn default_sample_interval() -> f64 {
    defaults::DEFAULT_SAMPLE_INTERVAL_S
}
fn default_max_samples() -> usize {
    defaults::MAX_SAMPLES
}
fn default_zero_offset() -> f64 {
    defaults::DEFAULT_ZERO_OFFSET
}
fn default_sensitivity() -> f64 {
    defaults::DEFAULT_SENSITIVITY
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            default_sample_interval_s: default_sample_interval(),
            max_samples: default_max_samples(),
            conversion: ConversionStrategy::default(),
            zero_offset: default_zero_offset(),
            sensitivity: default_sensitivity(),
        }
    }
}

// ============================================================================
// Spectrum
// ============================================================================

/// Spectral transform settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumConfig {
    /// Zero bin 0 after the transform (gravity bias is not vibration)
    #[serde(default = "default_remove_dc")]
    pub remove_dc: bool,
}

fn default_remove_dc() -> bool {
    true
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            remove_dc: default_remove_dc(),
        }
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Failure classification policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Peaks below this magnitude classify as normal (g)
    #[serde(default = "default_amplitude_floor")]
    pub amplitude_floor_g: f64,

    /// Ascending, non-overlapping frequency bands
    #[serde(default = "default_bands")]
    pub bands: Vec<FrequencyBand>,
}

fn default_amplitude_floor() -> f64 {
    defaults::DEFAULT_AMPLITUDE_FLOOR_G
}

fn default_bands() -> Vec<FrequencyBand> {
    vec![
        FrequencyBand::new(0.0, Some(defaults::NORMAL_BAND_UPPER_HZ), FailureCategory::Normal),
        FrequencyBand::new(
            defaults::NORMAL_BAND_UPPER_HZ,
            Some(defaults::PROP_IMBALANCE_BAND_UPPER_HZ),
            FailureCategory::PropImbalance,
        ),
        FrequencyBand::new(
            defaults::PROP_IMBALANCE_BAND_UPPER_HZ,
            Some(defaults::SHAFT_ISSUE_BAND_UPPER_HZ),
            FailureCategory::ShaftIssue,
        ),
        FrequencyBand::new(
            defaults::SHAFT_ISSUE_BAND_UPPER_HZ,
            None,
            FailureCategory::BearingFailure,
        ),
    ]
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            amplitude_floor_g: default_amplitude_floor(),
            bands: default_bands(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
