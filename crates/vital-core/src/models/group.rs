use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::models::patient::{deserialize_priority_lenient, Position, Priority};

/// A grouping proposed by the model: a named cluster of patient ids with a
/// rationale. Every field is defaulted so a sparse model reply still
/// deserializes; ids are whitelist-filtered before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupSuggestion {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "patientIds")]
    pub patient_ids: Vec<String>,
    #[serde(default)]
    pub criteria: String,
    #[serde(default, deserialize_with = "deserialize_priority_lenient")]
    pub priority: Priority,
    #[serde(default, rename = "visualHint")]
    pub visual_hint: String,
}

/// An ephemeral, session-scoped patient group materialized from a model
/// suggestion. Used only to reposition cards on the canvas — never
/// persisted upstream. A group may legitimately be empty after its ids are
/// filtered against the known pool.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientGroup {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(rename = "patientIds")]
    pub patient_ids: Vec<String>,
    pub criteria: String,
    pub priority: Priority,
    #[serde(rename = "visualHint")]
    pub visual_hint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl PatientGroup {
    /// Materialize a group from a validated suggestion. The group gets a
    /// fresh id and no position until the canvas places it.
    pub fn from_suggestion(suggestion: GroupSuggestion) -> PatientGroup {
        PatientGroup {
            id: Uuid::new_v4(),
            name: suggestion.name,
            description: suggestion.description,
            patient_ids: suggestion.patient_ids,
            criteria: suggestion.criteria,
            priority: suggestion.priority,
            visual_hint: suggestion.visual_hint,
            position: None,
        }
    }
}
