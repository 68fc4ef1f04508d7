use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::knowledge::KnowledgeBase;
use crate::models::enums::ImageKind;
use crate::models::{AbcdAnalysis, ClassificationResult, ImageUpload, SkinCondition};
use crate::normalize::{canonical_symptom, canonical_text, contains_phrase};

use super::{abcd, match_confidence, rank, round1};

/// Text synthesised for an upload. Built from the file name and user
/// text only; pixels are never read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDescription {
    /// Canonical, space-joined description.
    pub text: String,
    pub location: Option<String>,
}

/// Scores skin conditions against an image description.
#[derive(Debug, Clone)]
pub struct ImageMatcher {
    kb: Arc<KnowledgeBase>,
    config: ClassifierConfig,
}

impl ImageMatcher {
    pub fn new(kb: Arc<KnowledgeBase>, config: ClassifierConfig) -> Self {
        Self { kb, config }
    }

    /// Build a description from the user's text plus the file-name stem.
    pub fn describe(&self, upload: &ImageUpload) -> ImageDescription {
        let stem = Path::new(&upload.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        self.describe_text(&format!("{} {}", upload.description, stem))
    }

    pub fn describe_text(&self, raw: &str) -> ImageDescription {
        let text = canonical_text(raw);
        let location = self.kb.guess_location(&text).map(str::to_string);
        ImageDescription { text, location }
    }

    /// Rank skin conditions for a description. Never returns an empty list.
    pub fn match_description(&self, description: &ImageDescription) -> Vec<ClassificationResult> {
        let candidates: Vec<ClassificationResult> = self
            .kb
            .skin_conditions
            .iter()
            .filter_map(|c| self.score(c, description))
            .collect();

        let inputs: Vec<String> = description
            .text
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        let candidate_count = candidates.len();
        let ranked = rank(candidates, &self.config, &inputs);
        tracing::debug!(
            candidates = candidate_count,
            returned = ranked.len(),
            location = description.location.as_deref().unwrap_or("unknown"),
            "Image description match complete"
        );
        ranked
    }

    /// ABCD analysis when the description or ranking calls for it.
    pub fn abcd(
        &self,
        description: &ImageDescription,
        results: &[ClassificationResult],
        kind: Option<ImageKind>,
    ) -> Option<AbcdAnalysis> {
        let pigmented = abcd::top_is_pigmented(results, |name| {
            self.kb.skin_condition(name).is_some_and(|c| c.pigmented)
        });
        abcd::applies(&description.text, &self.kb.abcd, kind, pigmented)
            .then(|| abcd::analyze(&description.text, &self.kb.abcd))
    }

    fn score(
        &self,
        condition: &SkinCondition,
        description: &ImageDescription,
    ) -> Option<ClassificationResult> {
        let indicators: Vec<(&String, String)> = condition
            .indicators
            .iter()
            .map(|k| (k, canonical_symptom(k)))
            .filter(|(_, canon)| !canon.is_empty())
            .collect();

        let matched: Vec<String> = indicators
            .iter()
            .filter(|(_, canon)| contains_phrase(&description.text, canon))
            .map(|(original, _)| (*original).clone())
            .collect();

        if matched.is_empty() {
            return None;
        }

        let location_hit = description
            .location
            .as_deref()
            .is_some_and(|loc| condition.common_locations.iter().any(|l| l == loc));
        let bonus = if location_hit { self.config.location_bonus } else { 0.0 };

        let raw = condition.base_confidence * matched.len() as f64 / indicators.len() as f64 + bonus;
        let probability = round1(raw.clamp(0.0, self.config.max_probability));

        Some(ClassificationResult {
            condition: condition.name.clone(),
            probability,
            confidence: match_confidence(matched.len()),
            severity: condition.severity,
            description: condition.description.clone(),
            recommendations: condition.recommendations.clone(),
            matched_keywords: matched,
            simulated: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::RiskTier;

    fn matcher() -> ImageMatcher {
        ImageMatcher::new(Arc::new(KnowledgeBase::builtin()), ClassifierConfig::default())
    }

    #[test]
    fn ring_rash_is_fungal_not_melanoma() {
        let m = matcher();
        let desc = m.describe_text("circular ring-shaped itchy rash");
        let results = m.match_description(&desc);
        assert_eq!(results[0].condition, "Fungal Infection (Ringworm)");
        assert!(results.iter().all(|r| r.condition != "Melanoma Warning Signs"));
        assert!(m.abcd(&desc, &results, None).is_none());
    }

    #[test]
    fn description_uses_file_name_stem() {
        let m = matcher();
        let upload = ImageUpload::new("left_forearm_rash.jpg", 2048).with_description("Itchy");
        let desc = m.describe(&upload);
        assert_eq!(desc.text, "itching left forearm rash");
        assert_eq!(desc.location.as_deref(), Some("arm"));
    }

    #[test]
    fn location_bonus_applies_to_matching_conditions() {
        let m = matcher();
        let without = m.match_description(&m.describe_text("pimples and blackheads"));
        let with = m.match_description(&m.describe_text("pimples and blackheads on my face"));
        let acne = |rs: &[ClassificationResult]| {
            rs.iter().find(|r| r.condition == "Acne").unwrap().probability
        };
        assert!((acne(&with) - acne(&without) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn location_alone_never_matches() {
        let m = matcher();
        let results = m.match_description(&m.describe_text("photo of my foot"));
        assert!(results[0].is_fallback());
    }

    #[test]
    fn blank_upload_yields_fallback() {
        let m = matcher();
        let results = m.match_description(&m.describe(&ImageUpload::new("", 1)));
        assert_eq!(results.len(), 1);
        assert!(results[0].is_fallback());
    }

    #[test]
    fn suspicious_mole_runs_abcd() {
        let m = matcher();
        let desc = m.describe_text("dark asymmetric mole with irregular border, black and brown, growing");
        let results = m.match_description(&desc);
        assert_eq!(results[0].condition, "Melanoma Warning Signs");
        let abcd = m.abcd(&desc, &results, None).unwrap();
        assert_eq!(abcd.total_score, 4);
        assert_eq!(abcd.risk, RiskTier::High);
    }

    #[test]
    fn results_sorted_and_bounded() {
        let m = matcher();
        let desc = m.describe_text("red itchy raised bumps and welts with swelling on the arm");
        let results = m.match_description(&desc);
        assert!(results.len() <= 5);
        for pair in results.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
        assert!(results.iter().all(|r| r.probability <= 90.0));
    }
}
