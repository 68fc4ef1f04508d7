//! Recommendation selection from a ranked condition list.
//!
//! Deterministic: the same ranked input always yields the same urgency
//! and advice.

use std::sync::Arc;

use crate::knowledge::KnowledgeBase;
use crate::models::enums::Urgency;
use crate::models::{ClassificationResult, Recommendation};
use crate::safety::filter_recommendations;

const HIGH_URGENCY: &[&str] = &[
    "Seek prompt medical attention",
    "Consider visiting an emergency department if symptoms are severe",
    "Avoid delaying medical care",
];

const MEDIUM_URGENCY: &[&str] = &[
    "Schedule an appointment with a healthcare provider within 24-48 hours",
    "Monitor symptoms closely",
    "Seek care sooner if symptoms worsen",
];

const LOW_URGENCY: &[&str] = &[
    "Consider consulting a healthcare provider if symptoms persist",
    "Monitor symptoms for changes",
    "Practice self-care measures",
];

const SELF_CARE: &[&str] = &[
    "Get adequate rest",
    "Stay well hydrated",
    "Eat nutritious foods",
    "Avoid strenuous activities",
];

const WARNING_SIGNS: &[&str] = &[
    "Symptoms worsen significantly",
    "Development of high fever (>101.3°F/38.5°C)",
    "Difficulty breathing or chest pain",
    "Severe or persistent vomiting",
    "Signs of dehydration",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Picks an urgency tier and advisory lists for ranked results.
#[derive(Debug, Clone)]
pub struct RecommendationSelector {
    kb: Arc<KnowledgeBase>,
}

impl RecommendationSelector {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    pub fn select(&self, ranked: &[ClassificationResult]) -> Recommendation {
        let Some(top) = ranked.first() else {
            return Recommendation {
                urgency: Urgency::Medium,
                recommendations: owned(&["Consult with a healthcare provider for proper evaluation"]),
                self_care: owned(&["Monitor symptoms", "Rest and stay hydrated"]),
                warning_signs: owned(&["Worsening symptoms", "High fever", "Difficulty breathing"]),
            };
        };

        let mut urgency = Urgency::from_probability(top.probability);
        if let Some(keyword) = top
            .matched_keywords
            .iter()
            .find(|k| self.kb.is_high_risk(k))
        {
            tracing::debug!(
                condition = %top.condition,
                keyword = %keyword,
                "High-risk symptom raised urgency"
            );
            urgency = Urgency::High;
        }

        let tier = match urgency {
            Urgency::High => HIGH_URGENCY,
            Urgency::Medium => MEDIUM_URGENCY,
            Urgency::Low => LOW_URGENCY,
        };

        let mut recommendations = owned(tier);
        for extra in filter_recommendations(&top.recommendations) {
            if !recommendations.contains(&extra) {
                recommendations.push(extra);
            }
        }

        Recommendation {
            urgency,
            recommendations,
            self_care: owned(SELF_CARE),
            warning_signs: owned(WARNING_SIGNS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Severity;

    fn selector() -> RecommendationSelector {
        RecommendationSelector::new(Arc::new(KnowledgeBase::builtin()))
    }

    fn result(probability: f64, matched: &[&str], recs: &[&str]) -> ClassificationResult {
        ClassificationResult {
            condition: "Test".into(),
            probability,
            confidence: 50.0,
            severity: Severity::Medium,
            description: String::new(),
            recommendations: owned(recs),
            matched_keywords: owned(matched),
            simulated: false,
        }
    }

    #[test]
    fn empty_input_is_medium_with_generic_advice() {
        let rec = selector().select(&[]);
        assert_eq!(rec.urgency, Urgency::Medium);
        assert_eq!(rec.recommendations.len(), 1);
    }

    #[test]
    fn urgency_follows_top_probability() {
        let s = selector();
        assert_eq!(s.select(&[result(72.0, &["cough"], &[])]).urgency, Urgency::Medium);
        assert_eq!(s.select(&[result(86.0, &["cough"], &[])]).urgency, Urgency::High);
        assert_eq!(s.select(&[result(40.0, &["cough"], &[])]).urgency, Urgency::Low);
    }

    #[test]
    fn only_top_result_drives_urgency() {
        let rec = selector().select(&[result(40.0, &["cough"], &[]), result(30.0, &["chest pain"], &[])]);
        assert_eq!(rec.urgency, Urgency::Low);
    }

    #[test]
    fn high_risk_keyword_escalates() {
        let rec = selector().select(&[result(24.0, &["chest pain"], &[])]);
        assert_eq!(rec.urgency, Urgency::High);
        assert_eq!(rec.recommendations[0], HIGH_URGENCY[0]);
    }

    #[test]
    fn condition_advice_is_appended_and_filtered() {
        let rec = selector().select(&[result(
            50.0,
            &["cough"],
            &["Rest in a quiet room", "Take 200 mg ibuprofen"],
        )]);
        assert!(rec.recommendations.contains(&"Rest in a quiet room".to_string()));
        assert!(!rec.recommendations.iter().any(|r| r.contains("mg")));
        assert_eq!(rec.recommendations.len(), LOW_URGENCY.len() + 1);
    }

    #[test]
    fn selection_is_deterministic() {
        let input = vec![result(77.0, &["fever"], &["Rest"])];
        let s = selector();
        assert_eq!(s.select(&input), s.select(&input));
    }

    #[test]
    fn self_care_and_warnings_always_present() {
        let rec = selector().select(&[result(20.0, &[], &[])]);
        assert_eq!(rec.self_care.len(), SELF_CARE.len());
        assert_eq!(rec.warning_signs.len(), WARNING_SIGNS.len());
    }
}
