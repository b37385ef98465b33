use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A raw lab value as it arrives from the record store: either a number or
/// free text like `"138/88"` or `"7.8%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum LabValue {
    Number(f64),
    Text(String),
}

impl LabValue {
    /// Coerce to a number by stripping every character except digits, `.`
    /// and `-`. Unparsable values become NaN.
    pub fn numeric(&self) -> f64 {
        match self {
            LabValue::Number(n) => *n,
            LabValue::Text(s) => {
                let filtered: String = s
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                filtered.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
    }
}

/// Qualitative status of a lab result. The vocabulary depends on the lab's
/// semantic category (glycemic control, blood pressure, oxygenation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LabStatus {
    High,
    Elevated,
    #[serde(rename = "pre-diabetic")]
    PreDiabetic,
    Controlled,
    Low,
    Good,
    Normal,
    Unknown,
}

impl std::fmt::Display for LabStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LabStatus::High => "high",
            LabStatus::Elevated => "elevated",
            LabStatus::PreDiabetic => "pre-diabetic",
            LabStatus::Controlled => "controlled",
            LabStatus::Low => "low",
            LabStatus::Good => "good",
            LabStatus::Normal => "normal",
            LabStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A hydrated lab result. `status` is always recomputed from `(name, value)`
/// at hydration time — never trusted from upstream storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LabResult {
    pub name: String,
    pub value: LabValue,
    pub status: LabStatus,
}

/// Coarse bucketing of a risk score, also used for update urgency and
/// group priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse a priority label from untrusted text (e.g. a model reply),
    /// defaulting to `Medium` on anything unrecognized.
    pub fn parse_lenient(text: &str) -> Priority {
        match text.trim().to_lowercase().as_str() {
            "critical" => Priority::Critical,
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(s)
    }
}

/// Deserialize a priority label leniently: missing, null or unrecognized
/// values become `Medium`. Used for model-supplied fields.
pub fn deserialize_priority_lenient<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label
        .as_deref()
        .map(Priority::parse_lenient)
        .unwrap_or(Priority::Medium))
}

/// A 2D canvas coordinate for a patient card or group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A patient row as it arrives from the record store. `labs` may be a
/// native JSON array or a JSON-encoded string and is normalized during
/// hydration.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    pub age: Option<u32>,
    pub conditions: Option<Vec<String>>,
    pub meds: Option<Vec<String>>,
    #[serde(default)]
    pub labs: serde_json::Value,
    pub created_at: Option<jiff::Timestamp>,
}

/// A fully-derived patient view model. `risk_score` and `priority` are
/// recomputed together from `conditions` and `labs` at hydration — one is
/// never cached without the other.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub conditions: Vec<String>,
    pub meds: Vec<String>,
    pub labs: Vec<LabResult>,
    #[serde(rename = "riskScore")]
    pub risk_score: i32,
    pub priority: Priority,
    #[serde(rename = "lastVisit")]
    pub last_visit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}
