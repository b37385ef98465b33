use jiff::Timestamp;
use serde_json::json;
use vital_core::hydrate::{
    category_for_source, hydrate_patient, hydrate_patients, hydrate_update, normalize_labs,
    read_time_label, urgency_for_category,
};
use vital_core::models::patient::{LabStatus, PatientRecord, Priority};
use vital_core::models::update::{UpdateCategory, UpdateRecord};
use vital_core::timefmt::{last_visit_label, relative_label};

fn at(s: &str) -> Timestamp {
    s.parse().unwrap()
}

fn record(id: &str, conditions: &[&str], labs: serde_json::Value) -> PatientRecord {
    PatientRecord {
        id: id.to_string(),
        name: format!("Patient {id}"),
        age: Some(61),
        conditions: Some(conditions.iter().map(|s| s.to_string()).collect()),
        meds: Some(vec![]),
        labs,
        created_at: Some(at("2026-08-23T09:00:00Z")),
    }
}

#[test]
fn hydrates_labs_from_a_native_array() {
    let rec = record(
        "p-1",
        &["Type 2 Diabetes"],
        json!([{ "name": "HbA1c", "value": 9.2 }]),
    );
    let patient = hydrate_patient(&rec, 0, at("2026-08-23T12:00:00Z"));

    assert_eq!(patient.labs.len(), 1);
    assert_eq!(patient.labs[0].status, LabStatus::High);
    // base 35 + diabetes 25 + HbA1c >= 9 bonus 35
    assert_eq!(patient.risk_score, 95);
    assert_eq!(patient.priority, Priority::Critical);
    assert_eq!(patient.last_visit, "Today");
}

#[test]
fn hydrates_labs_from_a_json_encoded_string() {
    let rec = record(
        "p-1",
        &[],
        json!("[{\"name\":\"BP Systolic\",\"value\":\"145\"}]"),
    );
    let patient = hydrate_patient(&rec, 0, at("2026-08-23T12:00:00Z"));

    assert_eq!(patient.labs.len(), 1);
    assert_eq!(patient.labs[0].status, LabStatus::High);
}

#[test]
fn malformed_labs_hydrate_to_an_empty_list() {
    for labs in [json!("not json"), json!(42), json!({ "name": "HbA1c" })] {
        let rec = record("p-1", &[], labs);
        let patient = hydrate_patient(&rec, 0, at("2026-08-23T12:00:00Z"));
        assert!(patient.labs.is_empty());
        assert_eq!(patient.risk_score, 35);
    }
}

#[test]
fn nameless_and_valueless_lab_entries() {
    let labs = normalize_labs(&json!([
        { "value": 7.0 },
        { "name": "", "value": 7.0 },
        { "name": "HbA1c" },
    ]));
    // Nameless entries are dropped; a missing value is kept as empty text.
    assert_eq!(labs.len(), 1);
    assert_eq!(labs[0].0, "HbA1c");
    assert!(labs[0].1.numeric().is_nan());
}

#[test]
fn a_named_lab_survives_an_unexpected_value_shape() {
    let labs = normalize_labs(&json!([
        { "name": "HbA1c", "value": true },
        { "name": "BP Systolic", "value": { "sys": 140 } },
        { "name": "Oxygen", "value": [97] },
    ]));
    // Only the value degrades, never the lab itself.
    assert_eq!(labs.len(), 3);
    for (_, value) in &labs {
        assert!(value.numeric().is_nan());
    }

    let rec = record("p-1", &[], json!([{ "name": "HbA1c", "value": true }]));
    let patient = hydrate_patient(&rec, 0, at("2026-08-23T12:00:00Z"));
    assert_eq!(patient.labs.len(), 1);
    assert_eq!(patient.labs[0].status, LabStatus::Unknown);
    assert_eq!(patient.risk_score, 35);
}

#[test]
fn pool_is_sorted_by_risk_descending() {
    let records = vec![
        record("low", &[], json!([])),
        record("high", &["COPD", "Heart Failure"], json!([])),
        record("mid", &["Hypertension"], json!([])),
    ];
    let patients = hydrate_patients(&records, at("2026-08-23T12:00:00Z"));
    let ids: Vec<&str> = patients.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["high", "mid", "low"]);
}

#[test]
fn source_maps_to_category_and_urgency() {
    let cases = [
        ("ADA Clinical Guidelines", UpdateCategory::Guidelines, Priority::High),
        ("FDA Drug Safety", UpdateCategory::DrugApproval, Priority::Critical),
        ("Payer Bulletin", UpdateCategory::Policy, Priority::Medium),
        ("NEJM", UpdateCategory::Research, Priority::High),
    ];
    for (source, category, urgency) in cases {
        assert_eq!(category_for_source(source), category);
        assert_eq!(urgency_for_category(category), urgency);
    }
}

#[test]
fn read_time_estimates() {
    assert_eq!(read_time_label(""), "1 min read");
    assert_eq!(read_time_label("short summary"), "1 min read");
    let long = vec!["word"; 360].join(" ");
    assert_eq!(read_time_label(&long), "2 min read");
}

#[test]
fn hydrates_an_update_against_the_pool() {
    let now = at("2026-08-23T12:00:00Z");
    let pool = hydrate_patients(
        &[
            record(
                "patient-a",
                &["Type 2 Diabetes"],
                json!([{ "name": "HbA1c", "value": 9.2 }]),
            ),
            record(
                "patient-b",
                &["Hypertension"],
                json!([{ "name": "HbA1c", "value": 6.5 }]),
            ),
        ],
        now,
    );

    let update = UpdateRecord {
        id: "u-1".to_string(),
        source: "FDA Approval".to_string(),
        title: "New therapy approved".to_string(),
        summary: "A short summary of the approval.".to_string(),
        rule_condition: Some("Diabetes".to_string()),
        rule_criterion: Some("HbA1c > 8.0".to_string()),
        rule_action: Some("Review eligibility".to_string()),
        created_at: Some(at("2026-08-21T12:00:00Z")),
    };

    let hydrated = hydrate_update(&update, &pool, now);
    assert_eq!(hydrated.category, UpdateCategory::DrugApproval);
    assert_eq!(hydrated.urgency, Priority::Critical);
    assert_eq!(hydrated.timestamp, "2 days ago");
    assert_eq!(hydrated.read_time, "1 min read");
    assert_eq!(hydrated.impacted_patients, vec!["patient-a".to_string()]);
}

#[test]
fn last_visit_buckets() {
    let now = at("2026-08-23T12:00:00Z");
    assert_eq!(
        last_visit_label(Some(at("2026-08-23T02:00:00Z")), 0, now),
        "Today"
    );
    assert_eq!(
        last_visit_label(Some(at("2026-08-22T10:00:00Z")), 0, now),
        "1 day ago"
    );
    assert_eq!(
        last_visit_label(Some(at("2026-08-20T10:00:00Z")), 0, now),
        "3 days ago"
    );
    assert_eq!(
        last_visit_label(Some(at("2026-08-13T10:00:00Z")), 0, now),
        "1 week ago"
    );
    assert_eq!(
        last_visit_label(Some(at("2026-08-08T10:00:00Z")), 0, now),
        "2 weeks ago"
    );
}

#[test]
fn last_visit_fallback_is_stable_per_index() {
    let now = at("2026-08-23T12:00:00Z");
    assert_eq!(last_visit_label(None, 0, now), "1 day ago");
    assert_eq!(last_visit_label(None, 2, now), "3 days ago");
    assert_eq!(last_visit_label(None, 6, now), "1 day ago");
    assert_eq!(last_visit_label(None, 2, now), "3 days ago");
}

#[test]
fn relative_labels_round_up_the_unit_chain() {
    let now = at("2026-08-23T12:00:00Z");
    assert_eq!(relative_label(None, now), "Just now");
    assert_eq!(relative_label(Some(at("2026-08-23T11:59:40Z")), now), "Just now");
    assert_eq!(relative_label(Some(at("2026-08-23T11:55:00Z")), now), "5 min ago");
    assert_eq!(relative_label(Some(at("2026-08-23T10:30:00Z")), now), "2 hours ago");
    assert_eq!(relative_label(Some(at("2026-08-20T12:00:00Z")), now), "3 days ago");
    assert_eq!(relative_label(Some(at("2026-08-13T12:00:00Z")), now), "1 week ago");
    assert_eq!(relative_label(Some(at("2026-06-24T12:00:00Z")), now), "2 months ago");
    assert_eq!(relative_label(Some(at("2025-07-19T12:00:00Z")), now), "1 year ago");
}
