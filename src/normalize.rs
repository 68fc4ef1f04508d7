//! Text normalisation for symptom labels and free-text descriptions.
//!
//! Everything the matchers compare goes through here first: lower-casing,
//! punctuation stripping, tokenising, and a fixed synonym table that maps
//! informal phrasing onto canonical symptom keys ("stuffy nose" becomes
//! "congestion"). Canonical keys are lower-case words joined by single spaces.

/// Informal phrase → canonical symptom key. Phrases are already normalised.
static SYNONYMS: &[(&str, &str)] = &[
    // Respiratory
    ("stuffy nose", "congestion"),
    ("blocked nose", "congestion"),
    ("nasal congestion", "congestion"),
    ("difficulty breathing", "shortness of breath"),
    ("trouble breathing", "shortness of breath"),
    ("hard to breathe", "shortness of breath"),
    ("cant breathe", "shortness of breath"),
    ("breathlessness", "shortness of breath"),
    ("coughing", "cough"),
    ("sneezes", "sneezing"),
    // Fever
    ("high temperature", "high fever"),
    ("temperature", "fever"),
    ("feverish", "fever"),
    ("the chills", "chills"),
    ("shivering", "chills"),
    // General
    ("tiredness", "fatigue"),
    ("exhaustion", "fatigue"),
    ("exhausted", "fatigue"),
    ("tired", "fatigue"),
    ("lightheaded", "dizziness"),
    ("light headed", "dizziness"),
    ("dizzy", "dizziness"),
    // Digestive
    ("stomach ache", "stomach pain"),
    ("stomachache", "stomach pain"),
    ("belly pain", "abdominal pain"),
    ("tummy ache", "abdominal pain"),
    ("throwing up", "vomiting"),
    ("vomit", "vomiting"),
    ("puking", "vomiting"),
    ("nauseous", "nausea"),
    ("nauseated", "nausea"),
    ("loose stools", "diarrhea"),
    ("loose motions", "diarrhea"),
    ("diarrhoea", "diarrhea"),
    // Pain
    ("head pain", "headache"),
    ("migraine", "headache"),
    ("back ache", "back pain"),
    ("backache", "back pain"),
    ("neck ache", "neck pain"),
    ("joint ache", "joint pain"),
    ("muscle ache", "muscle pain"),
    ("muscle aches", "muscle pain"),
    ("body pain", "body aches"),
    ("body ache", "body aches"),
    // Skin
    ("skin irritation", "rash"),
    ("skin rash", "rash"),
    ("itchy", "itching"),
    ("itchiness", "itching"),
    ("scratching", "itching"),
    // Urinary
    ("burning urination", "painful urination"),
    ("burning when peeing", "painful urination"),
    ("peeing often", "frequent urination"),
];

/// Longest synonym phrase, in words.
const MAX_SYNONYM_WORDS: usize = 4;

/// Lower-case, drop apostrophes, turn every other non-alphanumeric character
/// into a space, and collapse whitespace.
pub fn normalize_phrase(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalise free text into a token list with synonyms applied.
/// Empty input yields an empty list.
pub fn normalize_text(text: &str) -> Vec<String> {
    let phrase = normalize_phrase(text);
    let words: Vec<&str> = phrase.split_whitespace().collect();
    apply_synonyms(&words)
        .iter()
        .flat_map(|w| w.split(' '))
        .map(str::to_string)
        .collect()
}

/// Map one symptom label ("Stuffy_Nose", "tiredness") to its canonical key.
pub fn canonical_symptom(raw: &str) -> String {
    let phrase = normalize_phrase(raw);
    let words: Vec<&str> = phrase.split_whitespace().collect();
    apply_synonyms(&words).join(" ")
}

/// Canonical form of a free-text description, as one space-joined string.
pub fn canonical_text(text: &str) -> String {
    normalize_text(text).join(" ")
}

/// Whole-word phrase containment on canonical strings.
pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    format!(" {haystack} ").contains(&format!(" {needle} "))
}

/// Single left-to-right pass; at each position the longest synonym wins.
/// Replacements are never rescanned, so canonical keys cannot chain.
fn apply_synonyms(words: &[&str]) -> Vec<String> {
    let mut out = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        let mut replaced = false;
        let longest = MAX_SYNONYM_WORDS.min(words.len() - i);
        for len in (1..=longest).rev() {
            let candidate = words[i..i + len].join(" ");
            if let Some((_, canonical)) = SYNONYMS.iter().find(|(from, _)| *from == candidate) {
                out.push((*canonical).to_string());
                i += len;
                replaced = true;
                break;
            }
        }
        if !replaced {
            out.push(words[i].to_string());
            i += 1;
        }
    }
    out
}
