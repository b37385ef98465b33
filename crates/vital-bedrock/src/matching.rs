//! LLM-backed patient matching.
//!
//! The model is asked for a bare JSON array of patient ids; whatever comes
//! back is parsed leniently and then validated strictly against the known
//! pool. An unparsable completion degrades to an empty match — this path
//! never produces a false positive and never panics on model prose.

use aws_sdk_bedrockruntime::Client;
use tracing::{info, warn};

use crate::client::invoke_converse;
use crate::error::BedrockError;
use crate::prompt::{patient_context_json, PatientContext};
use crate::reply::{known_id_set, retain_known_ids, LlmReply};

const MATCH_SYSTEM_PROMPT: &str = "\
You are a medical AI assistant that matches patients against research criteria. \
You are given a free-text request and structured patient data. \
Return ONLY a JSON array of patient ID strings for the patients that clearly \
satisfy explicit criteria stated in the request. Do not infer beyond stated \
facts. If no patients match, return an empty array: [].";

const MATCH_TEMPERATURE: f32 = 0.1;
const MATCH_MAX_TOKENS: i32 = 500;

/// The outcome of one matching request.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Validated ids — every entry exists in the pool that was sent.
    pub matching_patient_ids: Vec<String>,
    /// The raw model analysis, for display alongside the highlight.
    pub analysis: String,
}

/// Ask the model which patients a free-text request applies to.
///
/// Provider failures and empty completions surface as errors (the caller
/// retries on user action); a completion that parses to nothing usable
/// yields an empty match list with the raw text as analysis.
pub async fn match_patients(
    client: &Client,
    model_id: &str,
    prompt: &str,
    patients: &[PatientContext],
) -> Result<MatchOutcome, BedrockError> {
    let context = patient_context_json(patients)?;
    let user_message = format!("{prompt}\n\nPATIENT DATA:\n{context}");

    let raw = invoke_converse(
        client,
        model_id,
        MATCH_SYSTEM_PROMPT,
        &user_message,
        MATCH_TEMPERATURE,
        MATCH_MAX_TOKENS,
    )
    .await?;

    let known = known_id_set(patients.iter().map(|p| p.id.clone()));

    let outcome = match LlmReply::parse(&raw) {
        LlmReply::Ids(ids) => MatchOutcome {
            matching_patient_ids: retain_known_ids(ids, &known),
            analysis: raw,
        },
        LlmReply::Structured(payload) => MatchOutcome {
            matching_patient_ids: retain_known_ids(payload.highlighted_patients, &known),
            analysis: if payload.analysis.is_empty() {
                raw
            } else {
                payload.analysis
            },
        },
        LlmReply::Unparsable(text) => {
            warn!("matching reply was not parsable; returning no matches");
            MatchOutcome {
                matching_patient_ids: Vec::new(),
                analysis: text,
            }
        }
    };

    info!(
        matched = outcome.matching_patient_ids.len(),
        pool = patients.len(),
        "patient matching complete"
    );

    Ok(outcome)
}
