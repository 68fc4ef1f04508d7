//! Content safety for every user-facing string the core emits.
//!
//! Advice mentioning prescriptive terms is dropped outright, diagnostic
//! phrasing in generated sentences is softened ("you have" → "you may
//! have"), and credential words in free text are redacted before it is
//! placed into a prompt.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Terms that make a recommendation read like a prescription or diagnosis.
static RESTRICTED_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:medications?|prescribe[sd]?|prescription|dosages?|mg|pills?|tablets?|antibiotics?|steroids?|diagnosis|definitely|certainly)\b",
    )
    .expect("Invalid restricted-terms regex")
});

/// Imperative openers rewritten into a suggestion to ask a professional.
static IMPERATIVE_TAKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Take\s+").expect("Invalid imperative regex"));
static IMPERATIVE_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Use\s+").expect("Invalid imperative regex"));

struct SoftenRule {
    pattern: Regex,
    replacement: &'static str,
}

static SOFTEN_RULES: LazyLock<Vec<SoftenRule>> = LazyLock::new(|| {
    vec![
        SoftenRule {
            pattern: Regex::new(r"(?i)\b(?:the\s+)?diagnosis\s+is\b").expect("Invalid soften regex"),
            replacement: "this may suggest",
        },
        SoftenRule {
            pattern: Regex::new(r"(?i)\btake\s+(?:this\s+)?medication\b").expect("Invalid soften regex"),
            replacement: "consult a healthcare provider about treatment",
        },
    ]
});

/// "you have", unless it is part of a question ("do you have").
static YOU_HAVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\b(?:do|did|if|whether)\s+)?\b(you)\s+have\b").expect("Invalid soften regex")
});

/// Credential vocabulary that must never travel into a prompt.
static CREDENTIAL_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:passwords?|passcodes?|logins?|credentials?|access\s+codes?|pin)\b")
        .expect("Invalid credential regex")
});

pub const REDACTED: &str = "[RESTRICTED]";

/// Shown in place of treatment text that reads like a prescription.
pub const SAFE_TREATMENT: &str = "Consult a healthcare provider about treatment options";

/// Restricted terms found in `text`, lower-cased, in order of appearance.
pub fn restricted_terms(text: &str) -> Vec<String> {
    RESTRICTED_TERMS
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Drop recommendations that mention restricted terms and turn bare
/// imperatives into suggestions to consult a professional.
pub fn filter_recommendations(recommendations: &[String]) -> Vec<String> {
    let mut kept = Vec::with_capacity(recommendations.len());
    for rec in recommendations {
        let hits = restricted_terms(rec);
        if !hits.is_empty() {
            tracing::debug!(terms = ?hits, "Recommendation dropped by content filter");
            continue;
        }
        let rec = IMPERATIVE_TAKE.replace(rec, "Consider discussing with a healthcare provider about ");
        let rec = IMPERATIVE_USE.replace(&rec, "Ask a healthcare provider about ");
        kept.push(rec.into_owned());
    }
    kept
}

/// Soften diagnostic phrasing in a generated sentence.
pub fn soften_language(text: &str) -> String {
    let mut out = text.to_string();
    for rule in SOFTEN_RULES.iter() {
        out = rule.pattern.replace_all(&out, rule.replacement).into_owned();
    }
    YOU_HAVE
        .replace_all(&out, |caps: &Captures| match caps.get(1) {
            Some(_) => caps[0].to_string(),
            None => format!("{} may have", &caps[2]),
        })
        .into_owned()
}

/// Soften a treatment line, replacing it outright when it still names a
/// medication, dose or prescription.
pub fn safe_treatment(text: &str) -> String {
    let softened = soften_language(text);
    let hits = restricted_terms(&softened);
    if hits.is_empty() {
        softened
    } else {
        tracing::debug!(terms = ?hits, "Treatment text replaced by content filter");
        SAFE_TREATMENT.to_string()
    }
}

/// Replace credential words ("password", "login", "PIN") with a marker.
pub fn redact_credentials(text: &str) -> String {
    CREDENTIAL_TERMS.replace_all(text, REDACTED).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn drops_prescriptive_recommendations() {
        let out = filter_recommendations(&recs(&[
            "Take antibiotics twice daily",
            "Ask about a 500 mg dose",
            "Rest and drink plenty of fluids",
        ]));
        assert_eq!(out, recs(&["Rest and drink plenty of fluids"]));
    }

    #[test]
    fn restricted_terms_need_word_boundaries() {
        assert!(restricted_terms("Seek emergency care").is_empty());
        assert_eq!(restricted_terms("200mg or 200 MG"), vec!["mg".to_string()]);
        assert_eq!(restricted_terms("Definitely not a pill"), vec!["definitely", "pill"]);
    }

    #[test]
    fn rewrites_bare_imperatives() {
        let out = filter_recommendations(&recs(&["Use saline spray", "Take a warm bath"]));
        assert_eq!(
            out,
            recs(&[
                "Ask a healthcare provider about saline spray",
                "Consider discussing with a healthcare provider about a warm bath",
            ])
        );
    }

    #[test]
    fn softens_you_have() {
        assert_eq!(
            soften_language("Based on this, you have Influenza."),
            "Based on this, you may have Influenza."
        );
        assert_eq!(soften_language("You have a rash"), "You may have a rash");
    }

    #[test]
    fn leaves_questions_alone() {
        assert_eq!(soften_language("Do you have a fever?"), "Do you have a fever?");
        assert_eq!(
            soften_language("Tell me if you have other symptoms"),
            "Tell me if you have other symptoms"
        );
    }

    #[test]
    fn softens_diagnosis_statements() {
        assert_eq!(
            soften_language("The diagnosis is migraine"),
            "this may suggest migraine"
        );
        assert_eq!(
            soften_language("take medication now"),
            "consult a healthcare provider about treatment now"
        );
    }

    #[test]
    fn prescriptive_treatment_is_replaced() {
        assert_eq!(safe_treatment("Take 200 mg antiviral medication"), SAFE_TREATMENT);
        assert_eq!(
            safe_treatment("Rest, fluids, and time"),
            "Rest, fluids, and time"
        );
    }

    #[test]
    fn credentials_are_redacted_on_word_boundaries() {
        assert_eq!(
            redact_credentials("my Password and login are here"),
            "my [RESTRICTED] and [RESTRICTED] are here"
        );
        assert_eq!(redact_credentials("pins and needles"), "pins and needles");
        assert_eq!(redact_credentials("enter your PIN"), "enter your [RESTRICTED]");
    }
}
