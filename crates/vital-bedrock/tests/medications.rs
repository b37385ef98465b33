use vital_bedrock::medications::structure_suggestions;

const PROSE_REPLY: &str = "\
Based on the patient's profile, several options merit consideration.

Alternatives:
Metformin XR - better gastrointestinal tolerance with similar efficacy.
Semaglutide (Ozempic) - superior glucose control in head-to-head trials.
Empagliflozin - cardiovascular benefit for patients with heart disease.

Recommendations:
• Verify formulary status first
• Monitor renal function during transition
• Reassess glycemic control at the next visit";

#[test]
fn structures_a_sectioned_reply() {
    let suggestions = structure_suggestions(PROSE_REPLY);

    assert_eq!(suggestions.alternatives.len(), 3);
    assert_eq!(suggestions.alternatives[0].medication, "Metformin XR");
    assert_eq!(
        suggestions.alternatives[0].reason,
        "better gastrointestinal tolerance with similar efficacy"
    );
    // Parenthetical brand names are stripped.
    assert_eq!(suggestions.alternatives[1].medication, "Semaglutide");
    assert_eq!(suggestions.alternatives[2].medication, "Empagliflozin");

    // Coverage, effectiveness and side effects are assigned by rank.
    assert_eq!(
        suggestions.alternatives[0].coverage,
        "Covered by 95% of insurance plans"
    );
    assert_eq!(
        suggestions.alternatives[1].coverage,
        "Covered by 78% of insurance plans"
    );

    assert_eq!(
        suggestions.recommendations,
        vec![
            "Verify formulary status first".to_string(),
            "Monitor renal function during transition".to_string(),
            "Reassess glycemic control at the next visit".to_string(),
        ]
    );

    assert_eq!(suggestions.analysis, PROSE_REPLY);
}

#[test]
fn unsectioned_prose_falls_back_to_canned_defaults() {
    let suggestions = structure_suggestions("The patient should continue current therapy.");

    assert_eq!(suggestions.alternatives.len(), 2);
    assert_eq!(suggestions.alternatives[0].medication, "Metformin XR");
    assert_eq!(suggestions.alternatives[1].medication, "Semaglutide");
    assert_eq!(suggestions.recommendations.len(), 4);
    assert!(suggestions
        .recommendations
        .contains(&"Verify insurance coverage before prescribing".to_string()));
    assert_eq!(
        suggestions.analysis,
        "The patient should continue current therapy."
    );
}

#[test]
fn at_most_three_alternatives_are_kept() {
    let reply = "\
Alternatives:
Drug A - first reason.
Drug B - second reason.
Drug C - third reason.
Drug D - fourth reason.";
    let suggestions = structure_suggestions(reply);
    assert_eq!(suggestions.alternatives.len(), 3);
    assert_eq!(suggestions.alternatives[2].medication, "Drug C");
}

#[test]
fn alternative_lines_without_a_dash_are_skipped() {
    let reply = "\
Alternatives:
Consider the following
Linagliptin - renal-safe option with once-daily dosing.";
    let suggestions = structure_suggestions(reply);
    assert_eq!(suggestions.alternatives.len(), 1);
    assert_eq!(suggestions.alternatives[0].medication, "Linagliptin");
}

#[test]
fn missing_reason_text_gets_a_default() {
    let reply = "Alternatives:\nDapagliflozin -   .";
    let suggestions = structure_suggestions(reply);
    assert_eq!(suggestions.alternatives[0].medication, "Dapagliflozin");
    assert_eq!(suggestions.alternatives[0].reason, "Evidence-based alternative");
}

#[test]
fn non_ascii_prose_around_the_headings_is_handled() {
    // Characters like İ grow when lowercased; section slicing must stay on
    // the original string's byte boundaries.
    let reply = "İİİ Alternatives:\nMetformin XR - better tolerance.\n\n\
                 İstanbul recommendations:\n• Verify coverage\n• Titrate slowly";
    let suggestions = structure_suggestions(reply);
    assert_eq!(suggestions.alternatives[0].medication, "Metformin XR");
    assert_eq!(suggestions.recommendations[0], "Verify coverage");

    let terse = structure_suggestions("İİİAlternatives:–x");
    assert_eq!(terse.alternatives.len(), 2);
    assert_eq!(terse.analysis, "İİİAlternatives:–x");
}

#[test]
fn recommendations_are_capped_at_five() {
    let reply = "Recommendations:\n• one\n• two\n• three\n• four\n• five\n• six";
    let suggestions = structure_suggestions(reply);
    assert_eq!(suggestions.recommendations.len(), 5);
    assert_eq!(suggestions.recommendations[4], "five");
}
