//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for AnalysisConfig.
///
/// Entries of an array of tables share the array's path, so every
/// `[[classifier.bands]]` field appears once as `classifier.bands.<field>`.
/// Any new field added to AnalysisConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [loader]
        "loader",
        "loader.default_sample_interval_s",
        "loader.max_samples",
        "loader.conversion",
        "loader.zero_offset",
        "loader.sensitivity",
        // [spectrum]
        "spectrum",
        "spectrum.remove_dc",
        // [classifier]
        "classifier",
        "classifier.amplitude_floor_g",
        // [[classifier.bands]]
        "classifier.bands",
        "classifier.bands.lower_hz",
        "classifier.bands.upper_hz",
        "classifier.bands.category",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`. Tables inside arrays are walked under the array's
/// own path and each path is reported once.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            } else if let Some(items) = v.as_array() {
                for item in items.iter().filter(|i| i.is_table()) {
                    for nested in walk_toml_keys(item, &path) {
                        if !keys.contains(&nested) {
                            keys.push(nested);
                        }
                    }
                }
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties go to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        best = match best {
            Some((best_key, best_dist))
                if best_dist < dist || (best_dist == dist && best_key < k) =>
            {
                Some((best_key, best_dist))
            }
            _ => Some((k, dist)),
        };
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Typical accelerometer full-scale range; floors above this never trigger.
const MAX_PLAUSIBLE_FLOOR_G: f64 = 16.0;

/// Validate physical ranges on a parsed AnalysisConfig.
///
/// Returns (errors, warnings): errors are impossible values that must
/// reject the config; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::AnalysisConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let l = &config.loader;

    // ADC counts are unsigned
    if l.zero_offset < 0.0 {
        errors.push(format!(
            "loader.zero_offset = {:.1} cannot be negative (raw counts are unsigned)",
            l.zero_offset
        ));
    }

    // Sample interval: 0.1 ms - 1 s covers every logger we have seen
    let interval = l.default_sample_interval_s;
    if interval.is_finite() && interval > 0.0 && !(1e-4..=1.0).contains(&interval) {
        warnings.push(ValidationWarning {
            field: "loader.default_sample_interval_s".to_string(),
            message: format!(
                "default_sample_interval_s = {interval} is outside typical range (0.0001-1 s)"
            ),
            suggestion: None,
        });
    }

    let floor = config.classifier.amplitude_floor_g;
    if floor > MAX_PLAUSIBLE_FLOOR_G {
        warnings.push(ValidationWarning {
            field: "classifier.amplitude_floor_g".to_string(),
            message: format!(
                "amplitude_floor_g = {floor:.2} exceeds typical sensor range ({MAX_PLAUSIBLE_FLOOR_G} g), every flight will classify as normal"
            ),
            suggestion: None,
        });
    }

    // Bands starting at or above Nyquist can never be reached for fixed-interval logs
    if interval.is_finite() && interval > 0.0 {
        let nyquist = 0.5 / interval;
        for (i, band) in config.classifier.bands.iter().enumerate() {
            if band.lower_hz >= nyquist {
                warnings.push(ValidationWarning {
                    field: format!("classifier.bands[{i}].lower_hz"),
                    message: format!(
                        "classifier.bands[{i}] starts at {:.1} Hz, at or above the {:.1} Hz Nyquist limit of the default sample interval",
                        band.lower_hz, nyquist
                    ),
                    suggestion: None,
                });
            }
        }
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
