//! Update rule evaluation.
//!
//! Research updates carry two free-text rule fields: a condition rule
//! (substring match over patient conditions) and a criterion rule. The
//! criterion vocabulary is a fixed set of clinical phrases; parsing turns
//! it into an explicit [`Criterion`] variant so the evaluator pattern-
//! matches instead of re-testing substrings ad hoc. A phrase that matches
//! no known pattern becomes [`Criterion::Unrecognized`], which passes
//! every patient — an unknown rule never excludes anyone.
//!
//! This module is the deterministic ground-truth path used at load time
//! for every update × patient-pool pair; it knows nothing about the LLM.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::patient::{deserialize_priority_lenient, Patient, Priority};

/// A parsed criterion rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Patient must carry the named lab with a finite value strictly
    /// greater than the threshold.
    LabThreshold { lab: String, value: f64 },
    /// Patient must have a condition containing the needle.
    HasCondition { needle: String },
    /// Patient must have a medication containing the needle.
    HasMedication { needle: String },
    /// Patient must have a condition containing the needle AND a risk
    /// score at or above the floor.
    ConditionWithMinRisk { needle: String, min_risk: i32 },
    /// No known pattern matched; evaluates to pass.
    Unrecognized,
}

impl Criterion {
    /// Parse a stored criterion phrase. Patterns are checked in a fixed
    /// order and the first hit wins, mirroring the rule vocabulary the
    /// updates are authored with.
    pub fn parse(text: &str) -> Criterion {
        let normalized = text.to_lowercase();

        if normalized.contains("hba1c") && normalized.contains('>') {
            return match hba1c_threshold(&normalized) {
                Some(value) => Criterion::LabThreshold {
                    lab: "hba1c".to_string(),
                    value,
                },
                // A glycemic phrase without an extractable threshold is
                // treated like any other unknown rule.
                None => Criterion::Unrecognized,
            };
        }

        if normalized.contains("eligible her2") {
            return Criterion::HasCondition {
                needle: "her2+".to_string(),
            };
        }

        if normalized.contains("trelegy") {
            return Criterion::HasMedication {
                needle: "trelegy".to_string(),
            };
        }

        if normalized.contains("patients on metformin") {
            return Criterion::HasMedication {
                needle: "metformin".to_string(),
            };
        }

        if normalized.contains("bp") || normalized.contains("130/80") {
            return Criterion::HasCondition {
                needle: "hypertension".to_string(),
            };
        }

        if normalized.contains("severe persistent asthma") {
            return Criterion::ConditionWithMinRisk {
                needle: "asthma".to_string(),
                min_risk: 60,
            };
        }

        Criterion::Unrecognized
    }

    /// Evaluate this criterion against a hydrated patient.
    pub fn evaluate(&self, patient: &Patient) -> bool {
        match self {
            Criterion::LabThreshold { lab, value } => {
                let Some(result) = patient
                    .labs
                    .iter()
                    .find(|l| l.name.to_lowercase().contains(lab.as_str()))
                else {
                    return false;
                };
                let measured = result.value.numeric();
                measured.is_finite() && measured > *value
            }
            Criterion::HasCondition { needle } => patient
                .conditions
                .iter()
                .any(|c| c.to_lowercase().contains(needle.as_str())),
            Criterion::HasMedication { needle } => patient
                .meds
                .iter()
                .any(|m| m.to_lowercase().contains(needle.as_str())),
            Criterion::ConditionWithMinRisk { needle, min_risk } => {
                let has_condition = patient
                    .conditions
                    .iter()
                    .any(|c| c.to_lowercase().contains(needle.as_str()));
                has_condition && patient.risk_score >= *min_risk
            }
            Criterion::Unrecognized => true,
        }
    }
}

/// Extract the numeric threshold from a phrase like `"HbA1c > 8.0"`.
/// Accepts `>`, `>=` and `≥` after the lab name, with optional whitespace.
fn hba1c_threshold(normalized: &str) -> Option<f64> {
    let mut search = normalized;
    while let Some(idx) = search.find("hba1c") {
        let after = search[idx + "hba1c".len()..].trim_start();
        let after = after
            .strip_prefix(">=")
            .or_else(|| after.strip_prefix('>'))
            .or_else(|| after.strip_prefix('≥'));
        if let Some(rest) = after {
            let rest = rest.trim_start();
            let digits: String = rest
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if digits.starts_with(|c: char| c.is_ascii_digit())
                && let Ok(value) = digits.parse::<f64>()
            {
                return Some(value);
            }
        }
        search = &search[idx + "hba1c".len()..];
    }
    None
}

/// Condition filter: a null/empty rule passes everyone; otherwise any of
/// the patient's conditions must contain the rule as a case-insensitive
/// substring.
pub fn matches_condition(patient: &Patient, rule: Option<&str>) -> bool {
    let Some(rule) = rule.filter(|r| !r.is_empty()) else {
        return true;
    };
    let normalized = rule.to_lowercase();
    patient
        .conditions
        .iter()
        .any(|c| c.to_lowercase().contains(&normalized))
}

/// Criterion filter: a null/empty rule passes everyone; otherwise the
/// parsed criterion decides.
pub fn passes_criterion(patient: &Patient, rule: Option<&str>) -> bool {
    let Some(rule) = rule.filter(|r| !r.is_empty()) else {
        return true;
    };
    Criterion::parse(rule).evaluate(patient)
}

/// The impacted-patient list for one update: ids of pool patients that
/// pass both filters, in pool order.
pub fn match_update_to_patients(
    rule_condition: Option<&str>,
    rule_criterion: Option<&str>,
    patients: &[Patient],
) -> Vec<String> {
    patients
        .iter()
        .filter(|p| matches_condition(p, rule_condition) && passes_criterion(p, rule_criterion))
        .map(|p| p.id.clone())
        .collect()
}

/// Age bounds occasionally present in extracted criteria. Not used by the
/// deterministic filter; carried so the extraction contract round-trips.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgeRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// Patient criteria extracted from a research update's text, either by the
/// model or by the deterministic fallback below.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractedCriteria {
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default, rename = "labValues")]
    pub lab_values: BTreeMap<String, f64>,
    #[serde(default, rename = "ageRange")]
    pub age_range: Option<AgeRange>,
    #[serde(default, deserialize_with = "deserialize_priority_lenient")]
    pub urgency: Priority,
}

impl Default for ExtractedCriteria {
    fn default() -> Self {
        ExtractedCriteria {
            conditions: Vec::new(),
            medications: Vec::new(),
            lab_values: BTreeMap::new(),
            age_range: None,
            urgency: Priority::Medium,
        }
    }
}

impl ExtractedCriteria {
    /// Deterministic criteria extraction, used when the model is
    /// unavailable or returns unusable output. Recognizes the condition
    /// vocabulary of the seeded updates plus the first HbA1c threshold
    /// mentioned in the text.
    pub fn from_text(update_text: &str) -> ExtractedCriteria {
        let normalized = update_text.to_lowercase();
        let mut criteria = ExtractedCriteria::default();

        if normalized.contains("diabetes") {
            criteria.conditions.push("Type 2 Diabetes".to_string());
        }
        if normalized.contains("copd") {
            criteria.conditions.push("COPD".to_string());
        }
        if normalized.contains("breast cancer") || normalized.contains("her2") {
            criteria.conditions.push("HER2+ Breast Cancer".to_string());
        }
        if normalized.contains("asthma") {
            criteria.conditions.push("asthma".to_string());
        }

        if let Some(value) = first_number_after(&normalized, "hba1c") {
            criteria.lab_values.insert("HbA1c".to_string(), value);
        }

        criteria
    }

    /// Filter a patient pool down to the ids matching these criteria.
    ///
    /// A patient matches when at least one listed condition appears as a
    /// case-insensitive substring of one of their conditions (skipped when
    /// no conditions are listed), and every listed lab threshold that the
    /// patient actually carries is strictly exceeded. Patients without a
    /// listed lab are not excluded by it.
    pub fn filter_patients(&self, patients: &[Patient]) -> Vec<String> {
        patients
            .iter()
            .filter(|patient| {
                if !self.conditions.is_empty() {
                    let hit = self.conditions.iter().any(|wanted| {
                        let wanted = wanted.to_lowercase();
                        patient
                            .conditions
                            .iter()
                            .any(|c| c.to_lowercase().contains(&wanted))
                    });
                    if !hit {
                        return false;
                    }
                }

                for (lab_name, threshold) in &self.lab_values {
                    let wanted = lab_name.to_lowercase();
                    let Some(lab) = patient
                        .labs
                        .iter()
                        .find(|l| l.name.to_lowercase().contains(&wanted))
                    else {
                        continue;
                    };
                    let value = lab.value.numeric();
                    if value.is_finite() && value <= *threshold {
                        return false;
                    }
                }

                true
            })
            .map(|p| p.id.clone())
            .collect()
    }
}

/// First number following a marker word, skipping any non-digit characters
/// in between (e.g. `"HbA1c above 8.0"` → 8.0).
fn first_number_after(normalized: &str, marker: &str) -> Option<f64> {
    let idx = normalized.find(marker)?;
    let rest = &normalized[idx + marker.len()..];
    let start = rest.find(|c: char| c.is_ascii_digit())?;
    let digits: String = rest[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok()
}
