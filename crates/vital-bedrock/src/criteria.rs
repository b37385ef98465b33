//! Criteria extraction from research-update text.
//!
//! The model is asked for a constrained JSON object describing the patient
//! criteria an update mentions. Any provider or parse failure falls back
//! to the deterministic extractor in vital-core — this function never
//! fails, it only degrades.

use aws_sdk_bedrockruntime::Client;
use tracing::warn;

use vital_core::rules::ExtractedCriteria;

use crate::client::invoke_converse;

const CRITERIA_SYSTEM_PROMPT: &str = "\
You are a medical AI assistant that analyzes research updates and extracts \
patient criteria. Return ONLY a JSON object with this exact structure:
{
  \"conditions\": [\"condition1\", \"condition2\"],
  \"medications\": [\"med1\", \"med2\"],
  \"labValues\": {\"labName\": thresholdValue},
  \"ageRange\": {\"min\": 18, \"max\": 65},
  \"urgency\": \"low|medium|high|critical\"
}

Extract ONLY what is explicitly mentioned in the text. Do not make \
assumptions. For lab values, extract the threshold mentioned (e.g., \
HbA1c > 8.0 becomes {\"HbA1c\": 8.0}). For conditions, use the exact \
medical terms mentioned. Return empty arrays/objects if nothing is \
mentioned.";

const CRITERIA_TEMPERATURE: f32 = 0.1;
const CRITERIA_MAX_TOKENS: i32 = 300;

/// Extract patient criteria from an update's text, via the model when it
/// cooperates and via deterministic pattern matching when it does not.
pub async fn extract_criteria(
    client: &Client,
    model_id: &str,
    update_text: &str,
) -> ExtractedCriteria {
    let user_message =
        format!("Analyze this research update and extract patient criteria:\n\n{update_text}");

    let raw = match invoke_converse(
        client,
        model_id,
        CRITERIA_SYSTEM_PROMPT,
        &user_message,
        CRITERIA_TEMPERATURE,
        CRITERIA_MAX_TOKENS,
    )
    .await
    {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "criteria extraction fell back to pattern matching");
            return ExtractedCriteria::from_text(update_text);
        }
    };

    match serde_json::from_str::<ExtractedCriteria>(raw.trim()) {
        Ok(criteria) => criteria,
        Err(e) => {
            warn!(error = %e, "criteria reply was not valid JSON; using fallback");
            ExtractedCriteria::from_text(update_text)
        }
    }
}
