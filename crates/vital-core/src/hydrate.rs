//! Hydration: raw store rows → display-ready view models.
//!
//! Hydration is the only place lab statuses, risk scores, priorities,
//! categories and humanized labels are derived; nothing derived is ever
//! read back from storage.

use jiff::Timestamp;
use serde::Deserialize;
use serde_json::Value;

use crate::labs::lab_status;
use crate::models::patient::{LabResult, LabValue, Patient, PatientRecord, Priority};
use crate::models::update::{ResearchUpdate, UpdateCategory, UpdateRecord};
use crate::risk::{priority_for, risk_score};
use crate::rules::match_update_to_patients;
use crate::timefmt::{last_visit_label, relative_label};

#[derive(Deserialize)]
struct RawLab {
    name: Option<String>,
    #[serde(default)]
    value: Value,
}

/// Normalize the store's `labs` column, which may be a native JSON array
/// or a JSON-encoded string. Entries without a name are dropped; a value
/// of any unexpected shape degrades to an empty (NaN-coercing) value, the
/// lab itself is kept.
pub fn normalize_labs(raw: &Value) -> Vec<(String, LabValue)> {
    let entries: Vec<Value> = match raw {
        Value::Array(items) => items.clone(),
        Value::String(s) if s.trim_start().starts_with('[') => {
            serde_json::from_str(s).unwrap_or_default()
        }
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| {
            let lab: RawLab = serde_json::from_value(entry).ok()?;
            let name = lab.name.filter(|n| !n.is_empty())?;
            let value = serde_json::from_value::<LabValue>(lab.value)
                .unwrap_or(LabValue::Text(String::new()));
            Some((name, value))
        })
        .collect()
}

/// Hydrate one patient row. Lab statuses, risk score and priority are all
/// recomputed here, together.
pub fn hydrate_patient(record: &PatientRecord, index: usize, now: Timestamp) -> Patient {
    let labs: Vec<LabResult> = normalize_labs(&record.labs)
        .into_iter()
        .map(|(name, value)| {
            let status = lab_status(&name, &value);
            LabResult {
                name,
                value,
                status,
            }
        })
        .collect();

    let conditions = record.conditions.clone().unwrap_or_default();
    let meds = record.meds.clone().unwrap_or_default();
    let score = risk_score(&conditions, &labs);

    Patient {
        id: record.id.clone(),
        name: record.name.clone(),
        age: record.age.unwrap_or(0),
        conditions,
        meds,
        labs,
        risk_score: score,
        priority: priority_for(score),
        last_visit: last_visit_label(record.created_at, index, now),
        position: None,
    }
}

/// Hydrate a full patient pool and sort it by risk score, highest first.
pub fn hydrate_patients(records: &[PatientRecord], now: Timestamp) -> Vec<Patient> {
    let mut patients: Vec<Patient> = records
        .iter()
        .enumerate()
        .map(|(index, record)| hydrate_patient(record, index, now))
        .collect();
    patients.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    patients
}

/// Derive an update's display category from its source string.
pub fn category_for_source(source: &str) -> UpdateCategory {
    let normalized = source.to_lowercase();
    if normalized.contains("guideline") {
        UpdateCategory::Guidelines
    } else if normalized.contains("fda") {
        UpdateCategory::DrugApproval
    } else if normalized.contains("payer") {
        UpdateCategory::Policy
    } else {
        UpdateCategory::Research
    }
}

/// Derive an update's urgency tier from its category.
pub fn urgency_for_category(category: UpdateCategory) -> Priority {
    match category {
        UpdateCategory::DrugApproval => Priority::Critical,
        UpdateCategory::Guidelines | UpdateCategory::Research => Priority::High,
        UpdateCategory::Policy => Priority::Medium,
    }
}

/// Reading-time estimate at 180 words per minute, floored at one minute.
pub fn read_time_label(summary: &str) -> String {
    let words = summary.split_whitespace().count();
    let minutes = ((words as f64) / 180.0).round().max(1.0) as i64;
    format!("{minutes} min read")
}

/// Hydrate one research update against the current patient pool.
/// `impacted_patients` is recomputed from the pool on every call.
pub fn hydrate_update(
    record: &UpdateRecord,
    patients: &[Patient],
    now: Timestamp,
) -> ResearchUpdate {
    let category = category_for_source(&record.source);

    ResearchUpdate {
        id: record.id.clone(),
        source: record.source.clone(),
        title: record.title.clone(),
        summary: record.summary.clone(),
        rule_condition: record.rule_condition.clone(),
        rule_criterion: record.rule_criterion.clone(),
        rule_action: record.rule_action.clone(),
        created_at: record.created_at,
        category,
        urgency: urgency_for_category(category),
        timestamp: relative_label(record.created_at, now),
        read_time: read_time_label(&record.summary),
        impacted_patients: match_update_to_patients(
            record.rule_condition.as_deref(),
            record.rule_criterion.as_deref(),
            patients,
        ),
    }
}
