use std::sync::Arc;

use crate::config::ClassifierConfig;
use crate::knowledge::KnowledgeBase;
use crate::models::{ClassificationResult, Condition};
use crate::normalize::{canonical_symptom, contains_phrase};

use super::{match_confidence, overlap_probability, rank};

/// Scores every knowledge-base condition against a set of symptom strings.
#[derive(Debug, Clone)]
pub struct SymptomMatcher {
    kb: Arc<KnowledgeBase>,
    config: ClassifierConfig,
}

impl SymptomMatcher {
    pub fn new(kb: Arc<KnowledgeBase>, config: ClassifierConfig) -> Self {
        Self { kb, config }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Rank conditions for the given symptoms. Never returns an empty list.
    pub fn match_symptoms(&self, symptoms: &[String]) -> Vec<ClassificationResult> {
        let canonical = canonical_inputs(symptoms);

        let candidates: Vec<ClassificationResult> = self
            .kb
            .conditions
            .iter()
            .filter_map(|c| self.score(c, &canonical))
            .collect();

        let candidate_count = candidates.len();
        let ranked = rank(candidates, &self.config, &canonical);
        tracing::debug!(
            inputs = canonical.len(),
            candidates = candidate_count,
            returned = ranked.len(),
            "Symptom match complete"
        );
        ranked
    }

    fn score(&self, condition: &Condition, symptoms: &[String]) -> Option<ClassificationResult> {
        let keywords: Vec<(&String, String)> = condition
            .keywords
            .iter()
            .map(|k| (k, canonical_symptom(k)))
            .filter(|(_, canon)| !canon.is_empty())
            .collect();

        let matched: Vec<String> = keywords
            .iter()
            .filter(|(_, canon)| symptoms.iter().any(|s| contains_phrase(s, canon)))
            .map(|(original, _)| (*original).clone())
            .collect();

        if matched.is_empty() {
            return None;
        }

        Some(ClassificationResult {
            condition: condition.name.clone(),
            probability: overlap_probability(
                condition.base_confidence,
                matched.len(),
                keywords.len(),
                self.config.max_probability,
            ),
            confidence: match_confidence(matched.len()),
            severity: condition.severity,
            description: condition.description.clone(),
            recommendations: condition.recommendations.clone(),
            matched_keywords: matched,
            simulated: false,
        })
    }
}

/// Canonicalise, drop empties, de-duplicate preserving order.
fn canonical_inputs(symptoms: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(symptoms.len());
    for s in symptoms {
        let canon = canonical_symptom(s);
        if !canon.is_empty() && !out.contains(&canon) {
            out.push(canon);
        }
    }
    out
}
