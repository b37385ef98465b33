use axum::extract::State;
use axum::Json;
use jiff::Timestamp;

use vital_core::hydrate::hydrate_patients;
use vital_core::models::patient::Patient;
use vital_store::records::fetch_patients;

use crate::error::ApiError;
use crate::state::AppState;

/// The hydrated patient pool, sorted by risk score descending.
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let records = fetch_patients(&state.store, &state.bucket).await?;
    Ok(Json(hydrate_patients(&records, Timestamp::now())))
}
