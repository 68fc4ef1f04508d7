use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::emergency::EmergencyAssessment;
use crate::insights::HealthInsights;

use super::condition::DiseaseInfo;
use super::enums::{RiskTier, Severity, Urgency};

/// Name of the generic result emitted when nothing clears the threshold.
pub const FALLBACK_CONDITION: &str = "General Consultation Recommended";

/// Name of the referral result for images that are not skin photographs.
pub const REFERRAL_CONDITION: &str = "General Medical Consultation Recommended";

/// One ranked condition. Created per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub condition: String,
    /// 0–100, rounded to one decimal.
    pub probability: f64,
    /// 0–85, grows with the number of matched keywords.
    pub confidence: f64,
    pub severity: Severity,
    pub description: String,
    pub recommendations: Vec<String>,
    pub matched_keywords: Vec<String>,
    /// Set when the score came from the simulated CNN path.
    #[serde(default)]
    pub simulated: bool,
}

impl ClassificationResult {
    pub fn is_fallback(&self) -> bool {
        self.condition == FALLBACK_CONDITION
    }
}

/// Optional patient context. Echoed through, never used for scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub medical_history: Option<String>,
}

/// Urgency tier plus the advisory lists derived from a ranked result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub urgency: Urgency,
    pub recommendations: Vec<String>,
    pub self_care: Vec<String>,
    pub warning_signs: Vec<String>,
}

/// Outcome of the ABCD mole-risk heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcdAnalysis {
    pub asymmetry: CriterionScore,
    pub border: CriterionScore,
    pub color: CriterionScore,
    pub diameter: CriterionScore,
    /// 0..=4
    pub total_score: u8,
    pub risk: RiskTier,
}

/// A single ABCD criterion: 0 or 1 plus the keywords that fired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: u8,
    pub evidence: Vec<String>,
}

/// Full symptom-check output handed back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomReport {
    pub symptoms: Vec<String>,
    pub conditions: Vec<ClassificationResult>,
    /// Background on the top condition; absent for the fallback result.
    pub condition_info: Option<DiseaseInfo>,
    pub recommendation: Recommendation,
    pub emergency: EmergencyAssessment,
    /// Mean probability of the returned conditions, capped at 95.
    pub overall_confidence: f64,
    pub patient: Option<PatientInfo>,
    /// Present only when patient context was supplied.
    pub insights: Option<HealthInsights>,
    /// Symptom-analysis prompt for a downstream model, restrictions appended.
    pub prompt: String,
    pub generated_at: NaiveDateTime,
}

/// Output for one analysed image upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageReport {
    pub file_name: String,
    pub description: String,
    pub location: Option<String>,
    pub conditions: Vec<ClassificationResult>,
    pub recommendation: Recommendation,
    pub abcd: Option<AbcdAnalysis>,
    pub prompt: String,
    pub generated_at: NaiveDateTime,
}
