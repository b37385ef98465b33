use axum::extract::State;
use axum::Json;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use vital_bedrock::matching;
use vital_bedrock::prompt::PatientContext;
use vital_core::hydrate::hydrate_patients;
use vital_store::records::fetch_patients;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MatchRequest {
    pub prompt: Option<String>,
    /// Opaque caller context, echoed back unchanged.
    #[serde(default)]
    pub context: Option<Value>,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub success: bool,
    #[serde(rename = "matchingPatientIds")]
    pub matching_patient_ids: Vec<String>,
    pub analysis: String,
    pub context: Option<Value>,
}

/// Match patients against a free-text request via the model. The returned
/// ids are always a subset of the current pool; an unparsable model reply
/// yields an empty list rather than an error.
pub async fn match_patients(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let prompt = req
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("prompt is required".to_string()))?;

    let records = fetch_patients(&state.store, &state.bucket).await?;
    let patients = hydrate_patients(&records, Timestamp::now());
    let context = PatientContext::from_patients(&patients);

    let outcome =
        matching::match_patients(&state.bedrock, &state.model_id, prompt, &context).await?;

    Ok(Json(MatchResponse {
        success: true,
        matching_patient_ids: outcome.matching_patient_ids,
        analysis: outcome.analysis,
        context: req.context,
    }))
}
