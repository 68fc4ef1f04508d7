use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::normalize::canonical_symptom;

/// A symptom the user picked from the catalogue or typed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectedSymptom {
    Canonical { key: String },
    Custom { id: Uuid, text: String },
}

impl SelectedSymptom {
    pub fn canonical(raw: &str) -> Self {
        Self::Canonical {
            key: canonical_symptom(raw),
        }
    }

    pub fn custom(text: &str) -> Self {
        Self::Custom {
            id: Uuid::new_v4(),
            text: text.trim().to_string(),
        }
    }

    /// The string fed to the matchers.
    pub fn match_text(&self) -> String {
        match self {
            Self::Canonical { key } => key.clone(),
            Self::Custom { text, .. } => canonical_symptom(text),
        }
    }
}

/// Session-scoped symptom set. Insertion ordered, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomSelection {
    items: Vec<SelectedSymptom>,
}

impl SymptomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symptom; returns false if an equivalent one is already selected.
    pub fn add(&mut self, symptom: SelectedSymptom) -> bool {
        let text = symptom.match_text();
        if text.is_empty() || self.items.iter().any(|s| s.match_text() == text) {
            return false;
        }
        self.items.push(symptom);
        true
    }

    /// Remove by match text; returns whether anything was removed.
    pub fn remove(&mut self, text: &str) -> bool {
        let key = canonical_symptom(text);
        let before = self.items.len();
        self.items.retain(|s| s.match_text() != key);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[SelectedSymptom] {
        &self.items
    }

    pub fn match_texts(&self) -> Vec<String> {
        self.items.iter().map(SelectedSymptom::match_text).collect()
    }
}
