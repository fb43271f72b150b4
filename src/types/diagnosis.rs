//! Failure categories and the diagnosis produced by the classifier

use serde::{Deserialize, Serialize};

use super::Peak;

/// Mechanical condition inferred from the dominant vibration component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCategory {
    /// Low-amplitude or low-frequency activity (wind, normal flight)
    #[default]
    Normal,
    /// Chipped, dirty or unbalanced propeller blades
    PropImbalance,
    /// Bent motor shaft or misaligned motor bell
    ShaftIssue,
    /// Worn motor bearing / high-frequency resonance
    BearingFailure,
    /// Significant vibration outside every configured band
    Anomalous,
}

impl FailureCategory {
    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::PropImbalance => "Unbalanced Propeller",
            Self::ShaftIssue => "Bent Motor Shaft",
            Self::BearingFailure => "Bad Motor Bearing",
            Self::Anomalous => "Anomalous Vibration",
        }
    }

    /// Recommended inspection for this condition.
    pub fn advice(self) -> &'static str {
        match self {
            Self::Normal => "Vibration levels are minimal and safe.",
            Self::PropImbalance => "Check blades for chips or debris.",
            Self::ShaftIssue => "Inspect motor bells and shafts.",
            Self::BearingFailure => "High-frequency grinding detected; inspect motor bearings.",
            Self::Anomalous => "Vibration detected outside standard profiles; inspect airframe.",
        }
    }

    /// Whether this category calls for maintenance.
    pub fn is_fault(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classification of one flight's dominant vibration.
///
/// Purely derived from a [`Peak`]; recomputed whenever a new waveform arrives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Diagnosis {
    pub category: FailureCategory,
    pub peak: Peak,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_normal_is_not_a_fault() {
        assert!(!FailureCategory::Normal.is_fault());
        assert!(FailureCategory::PropImbalance.is_fault());
        assert!(FailureCategory::ShaftIssue.is_fault());
        assert!(FailureCategory::BearingFailure.is_fault());
        assert!(FailureCategory::Anomalous.is_fault());
    }

    #[test]
    fn test_category_serializes_screaming_snake() {
        let json = serde_json::to_string(&FailureCategory::PropImbalance).unwrap();
        assert_eq!(json, "\"PROP_IMBALANCE\"");
        let back: FailureCategory = serde_json::from_str("\"BEARING_FAILURE\"").unwrap();
        assert_eq!(back, FailureCategory::BearingFailure);
    }
}
