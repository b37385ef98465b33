use axum::extract::State;
use axum::Json;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use vital_bedrock::criteria::extract_criteria;
use vital_core::hydrate::hydrate_patients;
use vital_core::rules::ExtractedCriteria;
use vital_store::records::fetch_patients;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FindMatchesRequest {
    #[serde(rename = "updateText")]
    pub update_text: Option<String>,
    #[serde(default, rename = "updateId")]
    pub update_id: Option<String>,
}

#[derive(Serialize)]
pub struct FindMatchesData {
    #[serde(rename = "updateId")]
    pub update_id: Option<String>,
    pub criteria: ExtractedCriteria,
    #[serde(rename = "matchingPatientIds")]
    pub matching_patient_ids: Vec<String>,
    #[serde(rename = "patientCount")]
    pub patient_count: usize,
}

#[derive(Serialize)]
pub struct FindMatchesResponse {
    pub success: bool,
    pub data: FindMatchesData,
}

/// Extract patient criteria from an update's text (model-assisted, with a
/// deterministic fallback) and filter the store's patient pool by them.
pub async fn find_matches(
    State(state): State<AppState>,
    Json(req): Json<FindMatchesRequest>,
) -> Result<Json<FindMatchesResponse>, ApiError> {
    let update_text = req
        .update_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("updateText is required".to_string()))?;

    let criteria = extract_criteria(&state.bedrock, &state.model_id, update_text).await;

    let records = fetch_patients(&state.store, &state.bucket).await?;
    let patients = hydrate_patients(&records, Timestamp::now());
    let matching_patient_ids = criteria.filter_patients(&patients);
    let patient_count = matching_patient_ids.len();

    Ok(Json(FindMatchesResponse {
        success: true,
        data: FindMatchesData {
            update_id: req.update_id,
            criteria,
            matching_patient_ids,
            patient_count,
        },
    }))
}
