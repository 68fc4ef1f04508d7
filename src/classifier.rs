//! The `Classifier` seam: one synchronous call from input to ranked results.
//!
//! `RuleBasedClassifier` is the deterministic keyword matcher pair.
//! `SimulatedCnnClassifier` stands in for a model backend that does not
//! exist: it jitters the rule-based scores with a seedable RNG and flags
//! every result as simulated, so callers can never mistake it for inference.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ClassifierConfig;
use crate::knowledge::KnowledgeBase;
use crate::matching::image::ImageDescription;
use crate::matching::{round1, ImageMatcher, SymptomMatcher};
use crate::models::ClassificationResult;

/// Weight of the rule-based score when merged with a simulated score.
pub const RULE_WEIGHT: f64 = 0.3;
/// Weight of the simulated score when merged with a rule-based score.
pub const CNN_WEIGHT: f64 = 0.7;

/// What a classifier is asked to rank.
#[derive(Debug, Clone, Copy)]
pub enum ClassifierInput<'a> {
    Symptoms(&'a [String]),
    Image(&'a ImageDescription),
}

pub trait Classifier: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Ranked results, highest probability first. Never empty.
    fn classify(&self, input: ClassifierInput<'_>) -> Vec<ClassificationResult>;
}

// ═══════════════════════════════════════════
// Rule-based
// ═══════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct RuleBasedClassifier {
    symptoms: SymptomMatcher,
    images: ImageMatcher,
}

impl RuleBasedClassifier {
    pub fn new(kb: Arc<KnowledgeBase>, config: ClassifierConfig) -> Self {
        Self {
            symptoms: SymptomMatcher::new(kb.clone(), config.clone()),
            images: ImageMatcher::new(kb, config),
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        self.symptoms.config()
    }
}

impl Classifier for RuleBasedClassifier {
    fn name(&self) -> &'static str {
        "rule_based"
    }

    fn classify(&self, input: ClassifierInput<'_>) -> Vec<ClassificationResult> {
        match input {
            ClassifierInput::Symptoms(symptoms) => self.symptoms.match_symptoms(symptoms),
            ClassifierInput::Image(description) => self.images.match_description(description),
        }
    }
}

// ═══════════════════════════════════════════
// Simulated CNN
// ═══════════════════════════════════════════

pub struct SimulatedCnnClassifier {
    rules: RuleBasedClassifier,
    rng: Mutex<StdRng>,
}

impl SimulatedCnnClassifier {
    pub fn new(kb: Arc<KnowledgeBase>, config: ClassifierConfig) -> Self {
        Self {
            rules: RuleBasedClassifier::new(kb, config),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible variant for tests and demos.
    pub fn with_seed(kb: Arc<KnowledgeBase>, config: ClassifierConfig, seed: u64) -> Self {
        Self {
            rules: RuleBasedClassifier::new(kb, config),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn jitter(&self, results: &mut [ClassificationResult]) {
        let half_width = self.rules.config().cnn_jitter;
        // A poisoned lock only means another caller panicked mid-draw;
        // the RNG state is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        for result in results.iter_mut().filter(|r| !r.is_fallback()) {
            let delta = if half_width > 0.0 {
                rng.gen_range(-half_width..=half_width)
            } else {
                0.0
            };
            result.probability = round1((result.probability + delta).clamp(0.0, 100.0));
            result.simulated = true;
        }
    }
}

impl Classifier for SimulatedCnnClassifier {
    fn name(&self) -> &'static str {
        "simulated_cnn"
    }

    fn classify(&self, input: ClassifierInput<'_>) -> Vec<ClassificationResult> {
        let mut results = self.rules.classify(input);
        self.jitter(&mut results);
        results.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        tracing::debug!(
            classifier = self.name(),
            returned = results.len(),
            "Simulated scores produced"
        );
        results
    }
}

/// Merge rule-based and simulated rankings by condition name.
///
/// Conditions present in both get `0.3 × rule + 0.7 × simulated`; a
/// condition present in only one list keeps its own score. The merged list
/// is sorted descending and cut to `top_n`.
pub fn combine_predictions(
    rule_based: &[ClassificationResult],
    simulated: &[ClassificationResult],
    top_n: usize,
) -> Vec<ClassificationResult> {
    let mut merged: Vec<ClassificationResult> = rule_based.to_vec();
    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, r)| (r.condition.clone(), i))
        .collect();

    for cnn in simulated {
        match index.get(&cnn.condition) {
            Some(&i) => {
                let existing = &mut merged[i];
                existing.probability =
                    round1(existing.probability * RULE_WEIGHT + cnn.probability * CNN_WEIGHT);
                existing.simulated = !existing.is_fallback();
            }
            None => {
                let mut added = cnn.clone();
                added.simulated = !added.is_fallback();
                index.insert(added.condition.clone(), merged.len());
                merged.push(added);
            }
        }
    }

    merged.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    merged.truncate(top_n);
    merged
}
