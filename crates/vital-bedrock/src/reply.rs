//! Model reply parsing and whitelist validation.
//!
//! The model's output arrives in one of three shapes: a bare JSON array of
//! patient ids, a structured grouping object, or prose that may or may not
//! mention ids. [`LlmReply`] makes that explicit so callers pattern-match
//! once at the boundary instead of probing optional fields.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use vital_core::models::group::GroupSuggestion;

/// The structured grouping contract. Every field defaults so a sparse
/// reply still deserializes; ids are validated separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupingPayload {
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub groupings: Vec<GroupSuggestion>,
    #[serde(default, rename = "highlightedPatients")]
    pub highlighted_patients: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

impl GroupingPayload {
    /// Drop every patient id the known pool does not contain, in both the
    /// groupings and the highlighted list. A grouping may legitimately end
    /// up empty.
    pub fn retain_known_ids(&mut self, known: &HashSet<String>) {
        for group in &mut self.groupings {
            group.patient_ids.retain(|id| known.contains(id));
        }
        self.highlighted_patients.retain(|id| known.contains(id));
    }
}

/// A parsed model reply.
#[derive(Debug, Clone)]
pub enum LlmReply {
    /// A bare array of patient id strings (legacy matching contract).
    Ids(Vec<String>),
    /// The structured grouping contract.
    Structured(GroupingPayload),
    /// Neither JSON nor anything id-shaped could be recovered.
    Unparsable(String),
}

impl LlmReply {
    /// Parse a raw completion. JSON arrays and objects are taken at face
    /// value; otherwise UUID-shaped tokens are scavenged from the prose
    /// before giving up.
    pub fn parse(text: &str) -> LlmReply {
        if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
            match value {
                Value::Array(items) => {
                    let ids: Vec<String> = items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::String(s) => Some(s),
                            _ => None,
                        })
                        .collect();
                    return LlmReply::Ids(ids);
                }
                Value::Object(_) => {
                    if let Ok(payload) = serde_json::from_value::<GroupingPayload>(value) {
                        return LlmReply::Structured(payload);
                    }
                }
                _ => {}
            }
        }

        let scavenged = scavenge_uuids(text);
        if !scavenged.is_empty() {
            return LlmReply::Ids(scavenged);
        }

        LlmReply::Unparsable(text.to_string())
    }
}

/// Pull UUID-shaped tokens out of free text, deduplicated in order of
/// first appearance.
pub fn scavenge_uuids(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for token in text.split(|c: char| !(c.is_ascii_hexdigit() || c == '-')) {
        let candidate = token.trim_matches('-');
        if candidate.len() == 36
            && Uuid::parse_str(candidate).is_ok()
            && seen.insert(candidate.to_string())
        {
            ids.push(candidate.to_string());
        }
    }

    ids
}

/// Whitelist validation: keep only ids present in the known patient pool.
/// Unknown ids are untrusted model output, not an error — they are
/// silently dropped.
pub fn retain_known_ids(ids: Vec<String>, known: &HashSet<String>) -> Vec<String> {
    ids.into_iter().filter(|id| known.contains(id)).collect()
}

/// Build the known-id set from any iterator of ids.
pub fn known_id_set<I, S>(ids: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(Into::into).collect()
}
