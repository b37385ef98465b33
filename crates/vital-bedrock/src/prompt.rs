//! Patient context serialization for prompts.
//!
//! Every AI request carries the same structured slice of the patient pool
//! so the model can only reference patients that actually exist.

use serde::{Deserialize, Serialize};

use vital_core::models::patient::Patient;

use crate::error::BedrockError;

/// The per-patient context sent to the model: identity, demographics,
/// clinical lists and the derived risk fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientContext {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub conditions: Vec<String>,
    pub medications: Vec<String>,
    #[serde(rename = "labValues")]
    pub lab_values: Vec<LabLine>,
    #[serde(rename = "riskScore")]
    pub risk_score: i32,
    pub priority: String,
}

/// One lab line: name, raw value rendered as text, derived status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabLine {
    pub name: String,
    pub value: String,
    pub status: String,
}

impl PatientContext {
    pub fn from_patient(patient: &Patient) -> PatientContext {
        PatientContext {
            id: patient.id.clone(),
            name: patient.name.clone(),
            age: patient.age,
            conditions: patient.conditions.clone(),
            medications: patient.meds.clone(),
            lab_values: patient
                .labs
                .iter()
                .map(|lab| LabLine {
                    name: lab.name.clone(),
                    value: match &lab.value {
                        vital_core::models::patient::LabValue::Number(n) => n.to_string(),
                        vital_core::models::patient::LabValue::Text(s) => s.clone(),
                    },
                    status: lab.status.to_string(),
                })
                .collect(),
            risk_score: patient.risk_score,
            priority: patient.priority.to_string(),
        }
    }

    pub fn from_patients(patients: &[Patient]) -> Vec<PatientContext> {
        patients.iter().map(PatientContext::from_patient).collect()
    }
}

/// Render a human-readable patient data block for a user prompt.
pub fn patient_context_block(patients: &[PatientContext]) -> String {
    let mut block = String::new();
    for p in patients {
        block.push_str(&format!("\nPatient: {} (ID: {})\n", p.name, p.id));
        block.push_str(&format!("- Age: {}\n", p.age));
        block.push_str(&format!("- Conditions: {}\n", p.conditions.join(", ")));
        block.push_str(&format!("- Medications: {}\n", p.medications.join(", ")));
        let labs: Vec<String> = p
            .lab_values
            .iter()
            .map(|lab| format!("{}: {} ({})", lab.name, lab.value, lab.status))
            .collect();
        block.push_str(&format!("- Labs: {}\n", labs.join(", ")));
        block.push_str(&format!("- Priority: {}\n", p.priority));
        block.push_str(&format!("- Risk Score: {}\n", p.risk_score));
    }
    block
}

/// Render the patient context as pretty-printed JSON, for prompts that
/// ask the model to read structured data.
pub fn patient_context_json(patients: &[PatientContext]) -> Result<String, BedrockError> {
    Ok(serde_json::to_string_pretty(patients)?)
}
