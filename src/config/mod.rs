//! Analysis Configuration Module
//!
//! Loader, spectrum and classifier tunables loaded from TOML, replacing the
//! hardcoded interval, calibration and band constants with values an
//! operator can adjust per airframe.
//!
//! ## Loading Order
//!
//! 1. `DRONE_VIBE_CONFIG` environment variable (path to TOML file)
//! 2. `drone_vibe.toml` in the current working directory
//! 3. Built-in defaults (the reference policy)
//!
//! ## Usage
//!
//! The config is an ordinary value passed into the pipeline; there is no
//! process-wide instance.
//!
//! ```ignore
//! let config = AnalysisConfig::load();
//! let pipeline = VibrationPipeline::new(config);
//! ```

mod analysis_config;
pub mod defaults;
pub mod validation;

pub use analysis_config::*;
