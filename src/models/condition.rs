use serde::{Deserialize, Serialize};

use super::enums::Severity;

/// A symptom-driven condition in the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    pub keywords: Vec<String>,
    /// Probability (0–100) reached when every keyword matches.
    pub base_confidence: f64,
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// A skin condition scored against an image description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinCondition {
    pub name: String,
    pub indicators: Vec<String>,
    #[serde(default)]
    pub common_locations: Vec<String>,
    pub base_confidence: f64,
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Pigmented lesions trigger the ABCD mole-risk analysis.
    #[serde(default)]
    pub pigmented: bool,
}

/// Background information shown alongside a predicted condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseInfo {
    pub description: String,
    pub severity: String,
    pub typical_duration: String,
    pub treatment: String,
}

impl DiseaseInfo {
    /// Returned for conditions without a curated entry.
    pub fn unknown() -> Self {
        Self {
            description: "Information not available".into(),
            severity: "Unknown".into(),
            typical_duration: "Varies".into(),
            treatment: "Consult healthcare provider".into(),
        }
    }
}
