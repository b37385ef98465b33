use axum::extract::State;
use axum::Json;
use jiff::Timestamp;

use vital_core::hydrate::{hydrate_patients, hydrate_update};
use vital_core::models::update::ResearchUpdate;
use vital_store::records::{fetch_patients, fetch_research_updates};

use crate::error::ApiError;
use crate::state::AppState;

/// Hydrated research updates, newest first, each with its impacted-patient
/// list precomputed against the current pool.
pub async fn list_updates(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResearchUpdate>>, ApiError> {
    let now = Timestamp::now();

    let patient_records = fetch_patients(&state.store, &state.bucket).await?;
    let update_records = fetch_research_updates(&state.store, &state.bucket).await?;

    let patients = hydrate_patients(&patient_records, now);
    let updates: Vec<ResearchUpdate> = update_records
        .iter()
        .map(|record| hydrate_update(record, &patients, now))
        .collect();

    Ok(Json(updates))
}
