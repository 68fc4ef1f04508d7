//! ABCD mole-risk heuristic: Asymmetry, Border, Color, Diameter.
//!
//! Purely keyword-driven. Each criterion scores 0 or 1; color needs at
//! least two distinct color words. Total 0–4 maps to a risk tier
//! (< 2 low, 2 medium, ≥ 3 high).

use crate::knowledge::AbcdKeywords;
use crate::models::enums::{ImageKind, RiskTier};
use crate::models::{AbcdAnalysis, ClassificationResult, CriterionScore};
use crate::normalize::{canonical_symptom, contains_phrase};

/// Distinct color words needed before color variation scores.
const MIN_DISTINCT_COLORS: usize = 2;

/// Score a canonical description.
pub fn analyze(description: &str, keywords: &AbcdKeywords) -> AbcdAnalysis {
    let asymmetry = criterion(description, &keywords.asymmetry, 1);
    let border = criterion(description, &keywords.border, 1);
    let color = criterion(description, &keywords.color, MIN_DISTINCT_COLORS);
    let diameter = criterion(description, &keywords.diameter, 1);

    let total_score = asymmetry.score + border.score + color.score + diameter.score;
    AbcdAnalysis {
        asymmetry,
        border,
        color,
        diameter,
        total_score,
        risk: RiskTier::from_abcd_total(total_score),
    }
}

/// Whether the analysis applies: the user flagged a mole, the text
/// mentions a lesion, or the top result is a pigmented condition.
pub fn applies(
    description: &str,
    keywords: &AbcdKeywords,
    kind: Option<ImageKind>,
    top_is_pigmented: bool,
) -> bool {
    kind == Some(ImageKind::Mole)
        || top_is_pigmented
        || find(description, &keywords.lesion).next().is_some()
}

/// Convenience for callers holding ranked results.
pub fn top_is_pigmented(
    results: &[ClassificationResult],
    is_pigmented: impl Fn(&str) -> bool,
) -> bool {
    results.first().is_some_and(|r| is_pigmented(&r.condition))
}

fn criterion(description: &str, words: &[String], needed: usize) -> CriterionScore {
    let mut evidence: Vec<String> = Vec::new();
    for word in find(description, words) {
        if !evidence.contains(&word) {
            evidence.push(word);
        }
    }
    CriterionScore {
        score: u8::from(evidence.len() >= needed),
        evidence,
    }
}

fn find<'a>(description: &'a str, words: &'a [String]) -> impl Iterator<Item = String> + 'a {
    words
        .iter()
        .map(|w| canonical_symptom(w))
        .filter(move |w| contains_phrase(description, w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;
    use crate::normalize::canonical_text;

    fn run(text: &str) -> AbcdAnalysis {
        analyze(&canonical_text(text), &KnowledgeBase::builtin().abcd)
    }

    #[test]
    fn clean_description_scores_zero() {
        let a = run("small round mole");
        assert_eq!(a.total_score, 0);
        assert_eq!(a.risk, RiskTier::Low);
    }

    #[test]
    fn single_color_does_not_score() {
        let a = run("brown mole");
        assert_eq!(a.color.score, 0);
        assert_eq!(a.color.evidence, vec!["brown".to_string()]);
    }

    #[test]
    fn two_distinct_colors_score() {
        let a = run("mole that is brown and black");
        assert_eq!(a.color.score, 1);
        assert_eq!(a.color.evidence.len(), 2);
    }

    #[test]
    fn repeated_color_counts_once() {
        let a = run("black spot with a black center");
        assert_eq!(a.color.score, 0);
    }

    #[test]
    fn medium_risk_at_two() {
        let a = run("asymmetric mole with jagged edge");
        assert_eq!(a.asymmetry.score, 1);
        assert_eq!(a.border.score, 1);
        assert_eq!(a.total_score, 2);
        assert_eq!(a.risk, RiskTier::Medium);
    }

    #[test]
    fn all_criteria_give_high_risk() {
        let a = run("Asymmetrical mole, irregular border, brown and blue, growing larger");
        assert_eq!(a.total_score, 4);
        assert_eq!(a.risk, RiskTier::High);
    }

    #[test]
    fn applies_on_lesion_words_or_mole_kind() {
        let kw = KnowledgeBase::builtin().abcd;
        assert!(applies("dark spot on back", &kw, None, false));
        assert!(!applies("itching rash", &kw, None, false));
        assert!(applies("itching rash", &kw, Some(ImageKind::Mole), false));
        assert!(applies("itching rash", &kw, None, true));
    }
}
