use axum::extract::State;
use axum::Json;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use vital_bedrock::grouping::analyze_grouping;
use vital_bedrock::prompt::PatientContext;
use vital_core::models::group::PatientGroup;
use vital_core::models::patient::Patient;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Default, Deserialize)]
pub struct AnalyzeContext {
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default, rename = "highlightedPatients")]
    pub highlighted_patients: Vec<String>,
    #[serde(default, rename = "totalPatients")]
    pub total_patients: usize,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub prompt: Option<String>,
    #[serde(default, rename = "groupingType")]
    pub grouping_type: Option<String>,
    #[serde(default)]
    pub context: AnalyzeContext,
}

#[derive(Serialize)]
pub struct AnalyzeMetadata {
    #[serde(rename = "processedAt")]
    pub processed_at: Timestamp,
    #[serde(rename = "groupingType")]
    pub grouping_type: String,
    #[serde(rename = "patientCount")]
    pub patient_count: usize,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: String,
    pub groupings: Vec<PatientGroup>,
    #[serde(rename = "highlightedPatients")]
    pub highlighted_patients: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: String,
    pub metadata: AnalyzeMetadata,
}

/// Grouping analysis over the caller's patient pool. The pool in the
/// request context is also the whitelist: ids the model invents are gone
/// before the response is assembled, and a group that loses all of its
/// ids survives as an empty group.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let prompt = req
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("prompt is required".to_string()))?;

    let grouping_type = req.grouping_type.as_deref().unwrap_or("visual-group");
    let context = PatientContext::from_patients(&req.context.patients);

    let payload = analyze_grouping(
        &state.bedrock,
        &state.model_id,
        prompt,
        grouping_type,
        &context,
        &req.context.highlighted_patients,
    )
    .await?;

    let groupings: Vec<PatientGroup> = payload
        .groupings
        .into_iter()
        .map(PatientGroup::from_suggestion)
        .collect();

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis: payload.analysis,
        groupings,
        highlighted_patients: payload.highlighted_patients,
        recommendations: payload.recommendations,
        summary: payload.summary,
        metadata: AnalyzeMetadata {
            processed_at: Timestamp::now(),
            grouping_type: grouping_type.to_string(),
            patient_count: req.context.patients.len(),
        },
    }))
}
