use vital_bedrock::reply::{known_id_set, retain_known_ids, scavenge_uuids, LlmReply};
use vital_core::models::patient::Priority;

#[test]
fn parses_a_bare_id_array() {
    let reply = LlmReply::parse(r#"["patient-1", "patient-2"]"#);
    match reply {
        LlmReply::Ids(ids) => {
            assert_eq!(ids, vec!["patient-1".to_string(), "patient-2".to_string()]);
        }
        other => panic!("expected Ids, got {other:?}"),
    }
}

#[test]
fn non_string_array_items_are_dropped() {
    let reply = LlmReply::parse(r#"["patient-1", 42, null, {"id": "x"}]"#);
    match reply {
        LlmReply::Ids(ids) => assert_eq!(ids, vec!["patient-1".to_string()]),
        other => panic!("expected Ids, got {other:?}"),
    }
}

#[test]
fn parses_a_full_grouping_object() {
    let text = r#"{
        "analysis": "Two clear risk tiers.",
        "groupings": [{
            "name": "High risk diabetics",
            "description": "Poor glycemic control",
            "patientIds": ["patient-1", "patient-2"],
            "criteria": "HbA1c above 8",
            "priority": "high",
            "visualHint": "cluster top-left"
        }],
        "highlightedPatients": ["patient-1"],
        "recommendations": ["Review therapy"],
        "summary": "One group proposed."
    }"#;
    match LlmReply::parse(text) {
        LlmReply::Structured(payload) => {
            assert_eq!(payload.groupings.len(), 1);
            assert_eq!(payload.groupings[0].priority, Priority::High);
            assert_eq!(payload.groupings[0].patient_ids.len(), 2);
            assert_eq!(payload.highlighted_patients, vec!["patient-1".to_string()]);
        }
        other => panic!("expected Structured, got {other:?}"),
    }
}

#[test]
fn sparse_objects_fill_in_defaults() {
    match LlmReply::parse(r#"{"analysis": "nothing to group"}"#) {
        LlmReply::Structured(payload) => {
            assert_eq!(payload.analysis, "nothing to group");
            assert!(payload.groupings.is_empty());
            assert!(payload.highlighted_patients.is_empty());
            assert!(payload.summary.is_empty());
        }
        other => panic!("expected Structured, got {other:?}"),
    }
}

#[test]
fn unknown_priority_labels_default_to_medium() {
    let text = r#"{"groupings": [{"name": "g", "priority": "urgent!!"}]}"#;
    match LlmReply::parse(text) {
        LlmReply::Structured(payload) => {
            assert_eq!(payload.groupings[0].priority, Priority::Medium);
        }
        other => panic!("expected Structured, got {other:?}"),
    }
}

#[test]
fn scavenges_uuids_from_prose() {
    let text = "The matching patients are 550e8400-e29b-41d4-a716-446655440000 and \
                123e4567-e89b-42d3-a456-426614174000, with \
                550e8400-e29b-41d4-a716-446655440000 being the priority.";
    match LlmReply::parse(text) {
        LlmReply::Ids(ids) => {
            assert_eq!(
                ids,
                vec![
                    "550e8400-e29b-41d4-a716-446655440000".to_string(),
                    "123e4567-e89b-42d3-a456-426614174000".to_string(),
                ]
            );
        }
        other => panic!("expected Ids, got {other:?}"),
    }
}

#[test]
fn refusal_prose_is_unparsable() {
    match LlmReply::parse("I cannot help with that.") {
        LlmReply::Unparsable(raw) => assert_eq!(raw, "I cannot help with that."),
        other => panic!("expected Unparsable, got {other:?}"),
    }
}

#[test]
fn scavenger_ignores_malformed_uuids() {
    assert!(scavenge_uuids("almost 550e8400-e29b-41d4-a716-44665544000Z a uuid").is_empty());
    assert!(scavenge_uuids("550e8400e29b41d4a716446655440000").is_empty());
}

#[test]
fn whitelist_drops_unknown_ids() {
    let known = known_id_set(["patient-1", "patient-2"]);
    let ids = retain_known_ids(
        vec![
            "patient-1".to_string(),
            "unknown-ghost-id".to_string(),
            "patient-2".to_string(),
        ],
        &known,
    );
    assert_eq!(ids, vec!["patient-1".to_string(), "patient-2".to_string()]);
}

#[test]
fn grouping_ids_are_filtered_but_the_group_survives() {
    let text = r#"{
        "groupings": [
            {"name": "real", "patientIds": ["patient-1", "patient-99"]},
            {"name": "invented", "patientIds": ["patient-98", "patient-99"]}
        ],
        "highlightedPatients": ["patient-99", "patient-1"]
    }"#;
    let LlmReply::Structured(mut payload) = LlmReply::parse(text) else {
        panic!("expected Structured");
    };

    let known = known_id_set(["patient-1", "patient-2"]);
    payload.retain_known_ids(&known);

    assert_eq!(payload.groupings[0].patient_ids, vec!["patient-1".to_string()]);
    assert!(payload.groupings[1].patient_ids.is_empty());
    assert_eq!(payload.groupings.len(), 2);
    assert_eq!(payload.highlighted_patients, vec!["patient-1".to_string()]);
}
