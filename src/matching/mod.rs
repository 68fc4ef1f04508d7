//! Keyword scorers for symptom lists and image descriptions.
//!
//! Both matchers share one scoring rule:
//! `probability = min(cap, base × matched / total)`, drop anything at or
//! below the threshold, stable-sort descending, keep the top N, and fall
//! back to a single generic consultation result when nothing survives.

pub mod abcd;
pub mod image;
pub mod symptom;

use crate::config::ClassifierConfig;
use crate::models::enums::Severity;
use crate::models::{ClassificationResult, FALLBACK_CONDITION, REFERRAL_CONDITION};

pub use image::ImageMatcher;
pub use symptom::SymptomMatcher;

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Keyword-overlap probability, capped and rounded.
pub(crate) fn overlap_probability(base: f64, matched: usize, total: usize, cap: f64) -> f64 {
    if total == 0 || matched == 0 {
        return 0.0;
    }
    let raw = base * matched as f64 / total as f64;
    round1(raw.clamp(0.0, cap))
}

/// Certainty grows with the number of independent hits, never above 85.
pub(crate) fn match_confidence(matched: usize) -> f64 {
    (matched as f64 * 25.0).min(85.0)
}

/// Threshold, stable sort, truncate. Never returns an empty list.
pub(crate) fn rank(
    mut results: Vec<ClassificationResult>,
    config: &ClassifierConfig,
    inputs: &[String],
) -> Vec<ClassificationResult> {
    results.retain(|r| r.probability > config.min_probability);
    // `sort_by` is stable: equal probabilities keep knowledge-base order.
    results.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    results.truncate(config.top_n);

    if results.is_empty() {
        return vec![fallback_result(config, inputs)];
    }
    results
}

/// The generic "see a professional" result.
pub fn fallback_result(config: &ClassifierConfig, inputs: &[String]) -> ClassificationResult {
    ClassificationResult {
        condition: FALLBACK_CONDITION.to_string(),
        probability: config.fallback_probability,
        confidence: 30.0,
        severity: Severity::Medium,
        description: "Symptoms do not match common patterns. Professional medical consultation recommended."
            .to_string(),
        recommendations: vec!["Consult a healthcare provider for proper evaluation".to_string()],
        matched_keywords: inputs.to_vec(),
        simulated: false,
    }
}

/// Referral for images the skin matcher cannot interpret.
pub fn referral_result(config: &ClassifierConfig) -> ClassificationResult {
    ClassificationResult {
        condition: REFERRAL_CONDITION.to_string(),
        probability: config.fallback_probability,
        confidence: 60.0,
        severity: Severity::Medium,
        description: "Professional medical evaluation recommended for this type of image.".to_string(),
        recommendations: vec!["Consult with an appropriate medical specialist".to_string()],
        matched_keywords: vec![],
        simulated: false,
    }
}
