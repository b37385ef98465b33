//! Record collection reads.
//!
//! Each collection is one JSON document holding an array of rows. A read
//! failure surfaces whole — callers never hydrate from a partial load.

use aws_sdk_s3::Client;
use tracing::info;

use vital_core::models::patient::PatientRecord;
use vital_core::models::update::UpdateRecord;

use crate::error::StoreError;

pub const PATIENTS_KEY: &str = "records/patients.json";
pub const UPDATES_KEY: &str = "records/research_updates.json";

async fn get_json(client: &Client, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StoreError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StoreError::GetObject(err.to_string())
            }
        })?;

    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StoreError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(body)
}

/// Fetch every patient row. Row order is whatever the store holds; the
/// hydrator sorts by risk afterwards.
pub async fn fetch_patients(client: &Client, bucket: &str) -> Result<Vec<PatientRecord>, StoreError> {
    let body = get_json(client, bucket, PATIENTS_KEY).await?;
    let records: Vec<PatientRecord> = serde_json::from_slice(&body)?;

    info!(count = records.len(), "loaded patient records");

    Ok(records)
}

/// Fetch every research update, newest first (rows without a timestamp
/// sort last).
pub async fn fetch_research_updates(
    client: &Client,
    bucket: &str,
) -> Result<Vec<UpdateRecord>, StoreError> {
    let body = get_json(client, bucket, UPDATES_KEY).await?;
    let mut records: Vec<UpdateRecord> = serde_json::from_slice(&body)?;

    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    info!(count = records.len(), "loaded research updates");

    Ok(records)
}
