//! Emergency assessment over a raw symptom list.
//!
//! Rules are hard-coded and checked in severity order: any emergency
//! symptom → IMMEDIATE, more than five symptoms → URGENT, else NON-URGENT.

use serde::{Deserialize, Serialize};

use crate::models::enums::EmergencyLevel;
use crate::normalize::{canonical_symptom, contains_phrase};
use crate::prompt::{apply_content_restrictions, build_emergency_prompt};

/// Canonical symptom phrases that always warrant emergency care.
static EMERGENCY_SYMPTOMS: &[&str] = &[
    "chest pain",
    "shortness of breath",
    "severe headache",
    "loss of consciousness",
    "unconscious",
    "fainted",
    "severe bleeding",
    "signs of stroke",
    "stroke",
    "slurred speech",
    "severe allergic reaction",
    "anaphylaxis",
    "high fever with confusion",
    "severe abdominal pain",
    "seizure",
];

/// More symptoms than this escalates to URGENT.
const URGENT_SYMPTOM_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyAssessment {
    pub level: EmergencyLevel,
    /// One-sentence guidance for the level.
    pub urgency: String,
    /// Input symptoms that matched an emergency phrase, as given.
    pub emergency_symptoms: Vec<String>,
    pub actions: Vec<String>,
    /// Emergency triage prompt with the restriction block appended.
    pub prompt: String,
}

pub fn assess(symptoms: &[String]) -> EmergencyAssessment {
    let emergency_symptoms: Vec<String> = symptoms
        .iter()
        .filter(|s| is_emergency_symptom(s))
        .cloned()
        .collect();

    let non_empty = symptoms
        .iter()
        .filter(|s| !canonical_symptom(s).is_empty())
        .count();

    let level = if !emergency_symptoms.is_empty() {
        EmergencyLevel::Immediate
    } else if non_empty > URGENT_SYMPTOM_COUNT {
        EmergencyLevel::Urgent
    } else {
        EmergencyLevel::NonUrgent
    };

    if level == EmergencyLevel::Immediate {
        tracing::warn!(
            matched = emergency_symptoms.len(),
            "Emergency symptoms detected"
        );
    }

    EmergencyAssessment {
        level,
        urgency: urgency_sentence(level).to_string(),
        emergency_symptoms,
        actions: actions(level).iter().map(|s| (*s).to_string()).collect(),
        prompt: apply_content_restrictions(build_emergency_prompt(symptoms)),
    }
}

/// Whether one symptom label names an emergency.
pub fn is_emergency_symptom(symptom: &str) -> bool {
    let canon = canonical_symptom(symptom);
    EMERGENCY_SYMPTOMS
        .iter()
        .any(|e| contains_phrase(&canon, e))
}

fn urgency_sentence(level: EmergencyLevel) -> &'static str {
    match level {
        EmergencyLevel::Immediate => "Seek emergency medical care immediately",
        EmergencyLevel::Urgent => "Consider seeking medical care within hours",
        EmergencyLevel::NonUrgent => {
            "Monitor symptoms and consider medical consultation if they persist"
        }
    }
}

fn actions(level: EmergencyLevel) -> &'static [&'static str] {
    match level {
        EmergencyLevel::Immediate => &[
            "Seek emergency medical care immediately",
            "Do not drive yourself to hospital",
            "Have someone stay with you",
            "Prepare a list of current health information",
        ],
        EmergencyLevel::Urgent => &[
            "Consider going to an emergency room or urgent care",
            "Do not delay seeking medical care if symptoms worsen",
            "Bring identification and insurance information",
            "Have someone accompany you if possible",
        ],
        EmergencyLevel::NonUrgent => &[
            "Schedule an appointment with a healthcare provider",
            "Monitor symptoms for changes",
            "Seek immediate care if symptoms worsen significantly",
            "Practice self-care measures",
        ],
    }
}
