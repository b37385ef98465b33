//! Risk scoring.
//!
//! A patient's risk score is a deterministic function of their condition
//! list and lab results, clamped to [20, 100]. The priority tier is derived
//! from the score immediately afterwards — the two are never computed
//! separately.

use crate::models::patient::{LabResult, Priority};

const BASE_SCORE: i32 = 35;
const MIN_SCORE: i32 = 20;
const MAX_SCORE: i32 = 100;

/// Compute the risk score from conditions and hydrated labs.
///
/// Each condition category contributes its bonus at most once, no matter
/// how many of the patient's condition strings match it. Only the first
/// lab whose name contains "hba1c" contributes a glycemic bonus.
pub fn risk_score(conditions: &[String], labs: &[LabResult]) -> i32 {
    let lowered: Vec<String> = conditions.iter().map(|c| c.to_lowercase()).collect();
    let has = |needle: &str| lowered.iter().any(|c| c.contains(needle));

    let mut score = BASE_SCORE;

    if has("diabetes") {
        score += 25;
    }
    if has("copd") {
        score += 18;
    }
    if has("heart") || has("atrial") || has("cardio") {
        score += 20;
    }
    if has("cancer") {
        score += 15;
    }
    if has("hypertension") {
        score += 10;
    }
    if has("asthma") {
        score += 8;
    }

    if let Some(lab) = labs
        .iter()
        .find(|lab| lab.name.to_lowercase().contains("hba1c"))
    {
        let value = lab.value.numeric();
        if value.is_finite() {
            score += if value >= 9.0 {
                35
            } else if value >= 8.0 {
                25
            } else if value >= 7.2 {
                18
            } else if value >= 6.5 {
                10
            } else {
                0
            };
        }
    }

    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Bucket a risk score into a priority tier.
pub fn priority_for(score: i32) -> Priority {
    if score >= 85 {
        Priority::Critical
    } else if score >= 70 {
        Priority::High
    } else if score >= 50 {
        Priority::Medium
    } else {
        Priority::Low
    }
}
