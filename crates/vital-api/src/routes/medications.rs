use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use vital_bedrock::medications::{suggest, MedicationSuggestions};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MedicationRequest {
    pub prompt: Option<String>,
    /// Opaque caller context, echoed back unchanged.
    #[serde(default)]
    pub context: Option<Value>,
}

#[derive(Serialize)]
pub struct MedicationResponse {
    pub success: bool,
    pub response: MedicationSuggestions,
    #[serde(rename = "rawAnalysis")]
    pub raw_analysis: String,
    pub context: Option<Value>,
}

/// Medication alternatives for a free-text query.
pub async fn medication_suggestions(
    State(state): State<AppState>,
    Json(req): Json<MedicationRequest>,
) -> Result<Json<MedicationResponse>, ApiError> {
    let prompt = req
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("prompt is required".to_string()))?;

    let outcome = suggest(&state.bedrock, &state.model_id, prompt).await?;

    Ok(Json(MedicationResponse {
        success: true,
        response: outcome.response,
        raw_analysis: outcome.raw_analysis,
        context: req.context,
    }))
}
