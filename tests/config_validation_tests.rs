//! Config Validation Tests
//!
//! Typo detection, band table validation and physical range checks for
//! `AnalysisConfig`, exercised independently from the rest of the pipeline.

use drone_vibe::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use drone_vibe::config::{AnalysisConfig, ConfigError, ConversionStrategy};
use drone_vibe::diagnosis::FrequencyBand;
use drone_vibe::types::FailureCategory;

// ============================================================================
// Typo Detection Tests
// ============================================================================

#[test]
fn typo_in_amplitude_floor_warns_with_suggestion() {
    let toml_str = r#"
[classifier]
amplitude_flor_g = 0.3
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("amplitude_flor_g"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("classifier.amplitude_floor_g"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn typo_inside_band_table_is_detected() {
    let toml_str = r#"
[[classifier.bands]]
lower_hz = 0.0
uper_hz = 5.0
category = "NORMAL"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "classifier.bands.uper_hz");
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("classifier.bands.upper_hz")
    );
}

#[test]
fn completely_unknown_section_has_no_suggestion() {
    let warnings = validate_unknown_keys("[telemetry]\nuplink = true\n");
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|w| w.suggestion.is_none()));
}

#[test]
fn valid_config_produces_no_warnings() {
    let config = AnalysisConfig::default();
    let text = config.to_toml().unwrap();
    assert!(validate_unknown_keys(&text).is_empty());
}

#[test]
fn unknown_keys_do_not_fail_loading() {
    let config = AnalysisConfig::from_toml_str(
        r#"
[spectrum]
remove_dc = false
remove_dcc = true
"#,
    )
    .unwrap();
    assert!(!config.spectrum.remove_dc);
}

#[test]
fn suggestion_needs_close_match() {
    let known = known_config_keys();
    assert!(suggest_correction("loader.max_sample", &known).is_some());
    assert!(suggest_correction("completely.different.thing", &known).is_none());
}

// ============================================================================
// Band Table Tests
// ============================================================================

#[test]
fn custom_band_table_loads() {
    let config = AnalysisConfig::from_toml_str(
        r#"
[classifier]
amplitude_floor_g = 0.15

[[classifier.bands]]
lower_hz = 0.0
upper_hz = 4.0
category = "NORMAL"

[[classifier.bands]]
lower_hz = 4.0
upper_hz = 12.0
category = "PROP_IMBALANCE"

[[classifier.bands]]
lower_hz = 12.0
category = "BEARING_FAILURE"
"#,
    )
    .unwrap();

    assert_eq!(config.classifier.amplitude_floor_g, 0.15);
    assert_eq!(config.classifier.bands.len(), 3);
    assert_eq!(
        config.classifier.bands[2],
        FrequencyBand::new(12.0, None, FailureCategory::BearingFailure)
    );
}

#[test]
fn overlapping_bands_are_rejected() {
    let err = AnalysisConfig::from_toml_str(
        r#"
[[classifier.bands]]
lower_hz = 0.0
upper_hz = 10.0
category = "NORMAL"

[[classifier.bands]]
lower_hz = 5.0
upper_hz = 20.0
category = "SHAFT_ISSUE"
"#,
    )
    .unwrap_err();

    match err {
        ConfigError::Validation(errors) => {
            assert!(errors.iter().any(|e| e.contains("overlaps")), "{errors:?}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn unbounded_band_must_be_last() {
    let mut config = AnalysisConfig::default();
    config.classifier.bands[1].upper_hz = None;
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref e) if e.iter().any(|m| m.contains("only the last band"))));
}

#[test]
fn unknown_category_is_a_parse_error() {
    let err = AnalysisConfig::from_toml_str(
        r#"
[[classifier.bands]]
lower_hz = 0.0
category = "LOOSE_SCREW"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)));
}

#[test]
fn bands_with_gap_are_accepted() {
    let config = AnalysisConfig::from_toml_str(
        r#"
[[classifier.bands]]
lower_hz = 0.0
upper_hz = 5.0
category = "NORMAL"

[[classifier.bands]]
lower_hz = 8.0
category = "SHAFT_ISSUE"
"#,
    );
    assert!(config.is_ok());
}

// ============================================================================
// Range Validation Tests
// ============================================================================

#[test]
fn negative_zero_offset_is_an_error() {
    let mut config = AnalysisConfig::default();
    config.loader.zero_offset = -1.0;
    let (errors, _) = validate_physical_ranges(&config);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("zero_offset"));
}

#[test]
fn implausible_floor_warns() {
    let mut config = AnalysisConfig::default();
    config.classifier.amplitude_floor_g = 50.0;
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings
        .iter()
        .any(|w| w.field == "classifier.amplitude_floor_g"));
    assert!(config.validate().is_ok(), "Warnings must not fail validation");
}

#[test]
fn band_above_nyquist_warns() {
    let mut config = AnalysisConfig::default();
    config.loader.default_sample_interval_s = 0.05; // 10 Hz Nyquist
    let (_, warnings) = validate_physical_ranges(&config);
    let fields: Vec<&str> = warnings.iter().map(|w| w.field.as_str()).collect();
    assert!(fields.contains(&"classifier.bands[2].lower_hz"), "{fields:?}");
    assert!(fields.contains(&"classifier.bands[3].lower_hz"), "{fields:?}");
}

#[test]
fn zero_sensitivity_is_rejected() {
    let config = AnalysisConfig::from_toml_str(
        r#"
[loader]
conversion = "recompute"
sensitivity = 0.0
"#,
    );
    assert!(matches!(config, Err(ConfigError::Validation(_))));
}

#[test]
fn recompute_strategy_parses() {
    let config = AnalysisConfig::from_toml_str("[loader]\nconversion = \"recompute\"\n").unwrap();
    assert_eq!(config.loader.conversion, ConversionStrategy::Recompute);
}
