//! System-wide default constants.
//!
//! Every value here can be overridden from `drone_vibe.toml`; these are the
//! built-in fallbacks. Grouped by subsystem for easy discovery.

// ============================================================================
// Loader
// ============================================================================

/// Sample interval assumed for logs without timestamps (seconds).
///
/// The flight logger samples every 10 ms.
pub const DEFAULT_SAMPLE_INTERVAL_S: f64 = 0.01;

/// Maximum samples kept from one flight log; extra rows are dropped.
pub const MAX_SAMPLES: usize = 1024;

/// Fewest samples that still produce a meaningful spectrum.
pub const MIN_SAMPLES: usize = 2;

/// Raw ADC count that corresponds to 0 g.
pub const DEFAULT_ZERO_OFFSET: f64 = 349.0;

/// ADC counts per g (330 mV/g on a 10-bit, 5 V reference).
pub const DEFAULT_SENSITIVITY: f64 = 67.5;

// ============================================================================
// Classifier
// ============================================================================

/// Peaks below this magnitude are treated as noise regardless of frequency (g).
pub const DEFAULT_AMPLITUDE_FLOOR_G: f64 = 0.2;

/// Upper edge of the normal-operation band (Hz).
pub const NORMAL_BAND_UPPER_HZ: f64 = 5.0;

/// Upper edge of the propeller-imbalance band (Hz).
pub const PROP_IMBALANCE_BAND_UPPER_HZ: f64 = 10.0;

/// Upper edge of the shaft-issue band (Hz). Everything above is bearing.
pub const SHAFT_ISSUE_BAND_UPPER_HZ: f64 = 20.0;

// ============================================================================
// Config search
// ============================================================================

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "DRONE_VIBE_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "drone_vibe.toml";
