//! vital-store
//!
//! Read adapter over the hosted record store: patient and research-update
//! collections kept as JSON documents in S3. Thin wrapper around the AWS
//! S3 SDK — this crate never derives anything, it only fetches rows.

pub mod client;
pub mod error;
pub mod records;
