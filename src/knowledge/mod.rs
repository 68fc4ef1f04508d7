//! Knowledge base: the static tables every matcher scores against.
//!
//! Loaded once (bundled tables or a JSON override) and immutable afterwards;
//! share it behind an `Arc` when several callers need it.

pub mod builtin;
pub mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Condition, DiseaseInfo, SkinCondition};
use crate::normalize::{canonical_symptom, contains_phrase};

pub use loader::{load, load_or_builtin, save};

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge base I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Knowledge base JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid knowledge base entry {entry}: {reason}")]
    Invalid { entry: String, reason: String },
}

/// A named body region and the words that point to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyLocation {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Keyword families for the ABCD mole-risk heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcdKeywords {
    /// Words that mark a description as being about a pigmented lesion.
    pub lesion: Vec<String>,
    pub asymmetry: Vec<String>,
    pub border: Vec<String>,
    pub color: Vec<String>,
    pub diameter: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub conditions: Vec<Condition>,
    pub skin_conditions: Vec<SkinCondition>,
    #[serde(default)]
    pub disease_info: BTreeMap<String, DiseaseInfo>,
    #[serde(default)]
    pub high_risk_symptoms: Vec<String>,
    #[serde(default)]
    pub body_locations: Vec<BodyLocation>,
    pub abcd: AbcdKeywords,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        builtin::builtin()
    }
}

impl KnowledgeBase {
    pub fn builtin() -> Self {
        builtin::builtin()
    }

    pub fn condition(&self, name: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn skin_condition(&self, name: &str) -> Option<&SkinCondition> {
        self.skin_conditions
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Curated background for a condition, or a generic placeholder.
    pub fn disease_info(&self, name: &str) -> DiseaseInfo {
        self.disease_info
            .get(name)
            .cloned()
            .unwrap_or_else(DiseaseInfo::unknown)
    }

    /// Whether a canonical keyword counts as a high-risk symptom.
    pub fn is_high_risk(&self, keyword: &str) -> bool {
        let key = canonical_symptom(keyword);
        self.high_risk_symptoms
            .iter()
            .any(|h| canonical_symptom(h) == key)
    }

    /// First body location mentioned in a canonical description.
    pub fn guess_location(&self, canonical_description: &str) -> Option<&str> {
        self.body_locations
            .iter()
            .find(|loc| {
                loc.keywords
                    .iter()
                    .any(|kw| contains_phrase(canonical_description, &canonical_symptom(kw)))
            })
            .map(|loc| loc.name.as_str())
    }

    /// Reject tables the matchers cannot score sensibly.
    pub fn validate(&self) -> Result<(), KnowledgeError> {
        for c in &self.conditions {
            validate_entry(&c.name, &c.keywords, c.base_confidence)?;
        }
        for c in &self.skin_conditions {
            validate_entry(&c.name, &c.indicators, c.base_confidence)?;
        }
        Ok(())
    }
}

fn validate_entry(name: &str, keywords: &[String], base: f64) -> Result<(), KnowledgeError> {
    if name.trim().is_empty() {
        return Err(KnowledgeError::Invalid {
            entry: "<unnamed>".into(),
            reason: "name is empty".into(),
        });
    }
    if keywords.iter().all(|k| canonical_symptom(k).is_empty()) {
        return Err(KnowledgeError::Invalid {
            entry: name.into(),
            reason: "no usable keywords".into(),
        });
    }
    if !(0.0..=100.0).contains(&base) {
        return Err(KnowledgeError::Invalid {
            entry: name.into(),
            reason: format!("base confidence {base} outside 0-100"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Severity;

    #[test]
    fn builtin_tables_are_valid() {
        let kb = KnowledgeBase::builtin();
        kb.validate().unwrap();
        assert!(kb.conditions.len() >= 8);
        assert!(kb.skin_conditions.len() >= 6);
    }

    #[test]
    fn condition_lookup_is_case_insensitive() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.condition("influenza").is_some());
        assert!(kb.condition("Scurvy").is_none());
        assert!(kb.skin_condition("eczema").is_some());
    }

    #[test]
    fn disease_info_falls_back_to_unknown() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.disease_info("Migraine").typical_duration, "4-72 hours per episode");
        assert_eq!(kb.disease_info("Scurvy"), DiseaseInfo::unknown());
    }

    #[test]
    fn high_risk_matches_synonyms() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.is_high_risk("chest pain"));
        assert!(kb.is_high_risk("Difficulty breathing"));
        assert!(!kb.is_high_risk("sneezing"));
    }

    #[test]
    fn guesses_location_from_description() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.guess_location("red patch on my left forearm"), Some("arm"));
        assert_eq!(kb.guess_location("itching between the toes"), Some("foot"));
        assert_eq!(kb.guess_location("spot on the forehead"), Some("face"));
        assert_eq!(kb.guess_location("a rash"), None);
    }

    #[test]
    fn validate_rejects_empty_keywords() {
        let mut kb = KnowledgeBase::builtin();
        kb.conditions.push(Condition {
            name: "Empty".into(),
            keywords: vec!["  ".into()],
            base_confidence: 50.0,
            severity: Severity::Low,
            description: String::new(),
            recommendations: vec![],
        });
        let err = kb.validate().unwrap_err();
        assert!(matches!(err, KnowledgeError::Invalid { ref entry, .. } if entry == "Empty"));
    }

    #[test]
    fn validate_rejects_out_of_range_confidence() {
        let mut kb = KnowledgeBase::builtin();
        kb.skin_conditions[0].base_confidence = 120.0;
        assert!(kb.validate().is_err());
    }
}
