use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::patient::Priority;

/// A research update row as it arrives from the record store. The three
/// `rule_*` fields hold the free-text matching rules authored upstream.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateRecord {
    pub id: String,
    pub source: String,
    pub title: String,
    pub summary: String,
    pub rule_condition: Option<String>,
    pub rule_criterion: Option<String>,
    pub rule_action: Option<String>,
    pub created_at: Option<jiff::Timestamp>,
}

/// Display category of an update, derived from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum UpdateCategory {
    Guidelines,
    #[serde(rename = "Drug Approval")]
    DrugApproval,
    Policy,
    Research,
}

impl std::fmt::Display for UpdateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UpdateCategory::Guidelines => "Guidelines",
            UpdateCategory::DrugApproval => "Drug Approval",
            UpdateCategory::Policy => "Policy",
            UpdateCategory::Research => "Research",
        };
        f.write_str(s)
    }
}

/// A display-ready research update. `impacted_patients` is a derived,
/// non-authoritative view recomputed whenever the patient pool changes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResearchUpdate {
    pub id: String,
    pub source: String,
    pub title: String,
    pub summary: String,
    pub rule_condition: Option<String>,
    pub rule_criterion: Option<String>,
    pub rule_action: Option<String>,
    pub created_at: Option<jiff::Timestamp>,
    pub category: UpdateCategory,
    pub urgency: Priority,
    pub timestamp: String,
    #[serde(rename = "readTime")]
    pub read_time: String,
    #[serde(rename = "impactedPatients")]
    pub impacted_patients: Vec<String>,
}
