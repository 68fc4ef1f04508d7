//! General wellness insights from optional patient context.

use serde::{Deserialize, Serialize};

use crate::models::PatientInfo;

// ═══════════════════════════════════════════
// Rule tables
// ═══════════════════════════════════════════

/// (exclusive upper age bound, insight). The last bracket has no bound.
const AGE_BRACKETS: &[(u32, &str)] = &[
    (18, "Focus on healthy growth and development, regular pediatric check-ups, and establishing good health habits."),
    (30, "Maintain an active lifestyle, establish a preventive care routine, and look after mental health."),
    (50, "Regular health screenings become important; keep an eye on cardiovascular health and work-life balance."),
    (65, "Increase the frequency of health screenings and focus on chronic disease prevention and bone health."),
];

const SENIOR_INSIGHT: &str =
    "Comprehensive geriatric care, fall prevention and social engagement are key priorities.";

/// Medical-history substring → risk-factor sentence.
const HISTORY_RISKS: &[(&str, &str)] = &[
    ("diabetes", "Increased risk for cardiovascular disease and complications"),
    ("hypertension", "Risk factor for heart disease and stroke"),
    ("heart", "Cardiovascular risk factors present"),
    ("cancer", "Oncology follow-up and screening important"),
    ("asthma", "Respiratory health monitoring needed"),
    ("allergy", "Allergy management and avoidance strategies important"),
];

const GENERAL_RECOMMENDATIONS: &[&str] = &[
    "Maintain a regular exercise routine",
    "Follow a balanced diet",
    "Get adequate sleep (7-9 hours)",
    "Stay hydrated",
    "Schedule regular health check-ups with a healthcare provider",
];

const PREVENTIVE_MEASURES: &[&str] = &[
    "Annual health screenings with a healthcare provider",
    "Stay up to date with vaccinations as recommended by a healthcare provider",
    "Practice stress management techniques",
    "Use sun protection",
    "Maintain regular dental care",
];

// ═══════════════════════════════════════════
// Output
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthInsights {
    pub insights: Vec<String>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub preventive_measures: Vec<String>,
}

pub fn health_insights(patient: &PatientInfo) -> HealthInsights {
    let insights = patient
        .age
        .map(|age| vec![age_insight(age).to_string()])
        .unwrap_or_default();

    let risk_factors = patient
        .medical_history
        .as_deref()
        .map(history_risks)
        .unwrap_or_default();

    tracing::debug!(
        insights = insights.len(),
        risk_factors = risk_factors.len(),
        "Health insights generated"
    );

    HealthInsights {
        insights,
        risk_factors,
        recommendations: GENERAL_RECOMMENDATIONS.iter().map(|s| (*s).to_string()).collect(),
        preventive_measures: PREVENTIVE_MEASURES.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn age_insight(age: u32) -> &'static str {
    AGE_BRACKETS
        .iter()
        .find(|(bound, _)| age < *bound)
        .map(|(_, insight)| *insight)
        .unwrap_or(SENIOR_INSIGHT)
}

fn history_risks(history: &str) -> Vec<String> {
    let lower = history.to_lowercase();
    HISTORY_RISKS
        .iter()
        .filter(|(needle, _)| lower.contains(needle))
        .map(|(_, risk)| (*risk).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(age: Option<u32>, history: Option<&str>) -> PatientInfo {
        PatientInfo {
            age,
            gender: None,
            medical_history: history.map(str::to_string),
        }
    }

    #[test]
    fn age_brackets_are_exclusive_upper_bounds() {
        assert_eq!(age_insight(17), AGE_BRACKETS[0].1);
        assert_eq!(age_insight(18), AGE_BRACKETS[1].1);
        assert_eq!(age_insight(49), AGE_BRACKETS[2].1);
        assert_eq!(age_insight(64), AGE_BRACKETS[3].1);
        assert_eq!(age_insight(65), SENIOR_INSIGHT);
    }

    #[test]
    fn history_matches_case_insensitively() {
        let out = health_insights(&patient(Some(40), Some("Type 2 Diabetes, mild ASTHMA")));
        assert_eq!(out.insights.len(), 1);
        assert_eq!(
            out.risk_factors,
            vec![
                "Increased risk for cardiovascular disease and complications".to_string(),
                "Respiratory health monitoring needed".to_string(),
            ]
        );
    }

    #[test]
    fn heart_disease_history_flags_cardiovascular_risk() {
        let out = health_insights(&patient(None, Some("family heart disease")));
        assert_eq!(out.risk_factors, vec!["Cardiovascular risk factors present".to_string()]);
    }

    #[test]
    fn missing_context_still_returns_general_lists() {
        let out = health_insights(&PatientInfo::default());
        assert!(out.insights.is_empty());
        assert!(out.risk_factors.is_empty());
        assert_eq!(out.recommendations.len(), 5);
        assert_eq!(out.preventive_measures.len(), 5);
    }
}
