//! Lab status classification.
//!
//! Maps a `(lab name, raw value)` pair to a qualitative status. The status
//! is derived, never stored: callers recompute it on every hydration.

use crate::models::patient::{LabStatus, LabValue};

/// Classify a lab result. The lowercased name selects the category; the
/// first matching category wins.
pub fn lab_status(name: &str, value: &LabValue) -> LabStatus {
    let normalized = name.to_lowercase();
    let numeric = value.numeric();

    if normalized.contains("hba1c") {
        if !numeric.is_finite() {
            return LabStatus::Unknown;
        }
        return if numeric >= 9.0 {
            LabStatus::High
        } else if numeric >= 8.0 {
            LabStatus::Elevated
        } else if numeric >= 7.0 {
            LabStatus::PreDiabetic
        } else {
            LabStatus::Controlled
        };
    }

    if normalized.contains("bp") || normalized.contains("blood pressure") {
        if !numeric.is_finite() {
            return LabStatus::Unknown;
        }
        return if numeric >= 140.0 {
            LabStatus::High
        } else if numeric >= 130.0 {
            LabStatus::Elevated
        } else {
            LabStatus::Controlled
        };
    }

    if normalized.contains("oxygen") || normalized.contains("o2") {
        if !numeric.is_finite() {
            return LabStatus::Unknown;
        }
        return if numeric < 92.0 {
            LabStatus::Low
        } else {
            LabStatus::Good
        };
    }

    LabStatus::Normal
}
