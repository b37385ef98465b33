//! AI grouping: named clusters of patient cards for the canvas.
//!
//! Same discipline as matching — request structured JSON with an explicit
//! schema, parse leniently, validate strictly. The output is advisory
//! positioning data only; it never mutates patient records.

use aws_sdk_bedrockruntime::Client;
use tracing::info;

use crate::client::invoke_converse;
use crate::error::BedrockError;
use crate::prompt::{patient_context_block, PatientContext};
use crate::reply::{known_id_set, retain_known_ids, GroupingPayload, LlmReply};

const GROUPING_SYSTEM_PROMPT: &str = "\
You are a medical AI assistant that helps healthcare providers organize and \
group patient cards on a visual canvas.

Your task is to analyze the user's request and provide structured grouping \
recommendations based on the patient data provided.

Available grouping types:
- visual-group: Move cards into visual clusters on the canvas
- highlight-filter: Highlight patients that match specific criteria
- risk-stratify: Group patients by risk levels or severity
- condition-cluster: Group patients by similar medical conditions

Patient data includes: conditions, medications, lab values, risk scores, \
priority levels, and demographics.

Respond with a JSON object containing:
{
  \"analysis\": \"Brief explanation of your analysis and grouping strategy\",
  \"groupings\": [
    {
      \"name\": \"Group name\",
      \"description\": \"Why these patients are grouped together\",
      \"patientIds\": [\"patient1\", \"patient2\"],
      \"criteria\": \"The specific criteria used for grouping\",
      \"priority\": \"high|medium|low\",
      \"visualHint\": \"Suggested visual treatment (color, position, etc.)\"
    }
  ],
  \"highlightedPatients\": [\"patient1\", \"patient2\"],
  \"recommendations\": [\"Action item 1\", \"Action item 2\"],
  \"summary\": \"Overall summary of findings\"
}

Be precise and only include patients that clearly meet the specified criteria.";

const GROUPING_TEMPERATURE: f32 = 0.1;
const GROUPING_MAX_TOKENS: i32 = 1500;

/// Ask the model for grouping recommendations over the given pool.
///
/// Every id in the returned payload has been validated against the pool;
/// a grouping may come back empty and that is fine.
pub async fn analyze_grouping(
    client: &Client,
    model_id: &str,
    prompt: &str,
    grouping_type: &str,
    patients: &[PatientContext],
    highlighted: &[String],
) -> Result<GroupingPayload, BedrockError> {
    let highlighted_line = if highlighted.is_empty() {
        "None".to_string()
    } else {
        highlighted.join(", ")
    };

    let user_message = format!(
        "User Request: \"{prompt}\"\nGrouping Type: {grouping_type}\n\n\
         Patient Data:\n{data}\n\
         Currently Highlighted Patients: {highlighted_line}\n\n\
         Please analyze this data and provide grouping recommendations based \
         on the user's request.",
        data = patient_context_block(patients),
    );

    let raw = invoke_converse(
        client,
        model_id,
        GROUPING_SYSTEM_PROMPT,
        &user_message,
        GROUPING_TEMPERATURE,
        GROUPING_MAX_TOKENS,
    )
    .await?;

    let known = known_id_set(patients.iter().map(|p| p.id.clone()));

    let mut payload = match LlmReply::parse(&raw) {
        LlmReply::Structured(payload) => payload,
        // A bare id array still carries signal for highlight-filter
        // requests; wrap it in an otherwise-empty payload.
        LlmReply::Ids(ids) => GroupingPayload {
            highlighted_patients: retain_known_ids(ids, &known),
            ..GroupingPayload::default()
        },
        LlmReply::Unparsable(text) => {
            return Err(BedrockError::SchemaViolation(format!(
                "grouping reply was not valid JSON: {}",
                text.chars().take(200).collect::<String>()
            )));
        }
    };

    payload.retain_known_ids(&known);

    info!(
        groupings = payload.groupings.len(),
        highlighted = payload.highlighted_patients.len(),
        "grouping analysis complete"
    );

    Ok(payload)
}
