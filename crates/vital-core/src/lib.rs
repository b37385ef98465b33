//! vital-core
//!
//! Pure domain types and the deterministic matching/scoring core of the
//! Vital patient dashboard. No AWS or HTTP dependency — this is the shared
//! vocabulary of the system, plus the rule engine that decides which
//! patients a research update impacts.

pub mod hydrate;
pub mod labs;
pub mod models;
pub mod risk;
pub mod rules;
pub mod timefmt;
