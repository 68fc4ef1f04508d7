//! Structured prompts for a downstream language model.
//!
//! The core never calls a model itself; reports carry the prompt so a
//! presentation layer can forward it. Every piece of user text is passed
//! through `safety::redact_credentials` before it is interpolated, and every
//! finished prompt ends with `CONTENT_RESTRICTIONS`.

use crate::models::enums::ImageKind;
use crate::models::PatientInfo;
use crate::safety::redact_credentials;

/// Ages below this get the pediatric suffix.
const PEDIATRIC_AGE: u32 = 18;
/// Ages above this get the geriatric suffix.
const GERIATRIC_AGE: u32 = 65;

pub const RESTRICTION_RULES: &str = r#"CRITICAL RESTRICTIONS:
- Do NOT ask for passwords, login credentials, or other personal access information.
- Do NOT name specific medications, dosages, or prescriptions.
- Do NOT give definitive diagnoses. Use language such as "may suggest" or "could indicate".
- Provide educational information only, never medical advice.
- Always stress the importance of consulting a qualified healthcare professional."#;

pub const CONTENT_RESTRICTIONS: &str = r#"IMPORTANT CONTENT RESTRICTIONS:
- Do NOT ask for or request passwords or personal login credentials.
- Do NOT provide specific medication names, dosages, or prescriptions.
- Do NOT provide definitive medical diagnoses.
- Focus on general health information and on recommending professional care."#;

const PEDIATRIC_CONTEXT: &str = "PEDIATRIC CONSIDERATIONS: The person is a minor. A pediatric evaluation is strongly recommended, and parents or guardians should be involved in every healthcare decision.";
const GERIATRIC_CONTEXT: &str = "GERIATRIC CONSIDERATIONS: The person is an older adult. Take age-related health factors and possible interactions with existing treatment into account. Regular follow-up with a healthcare provider is important.";

/// Prompt for ranking possible conditions from a symptom list.
pub fn build_symptom_prompt(symptoms: &[String], patient: Option<&PatientInfo>) -> String {
    let mut prompt = String::from(
        "You are a health information assistant that helps people understand their symptoms. Analyse the symptoms below and answer in the structure requested.\n\n",
    );
    prompt.push_str(RESTRICTION_RULES);
    prompt.push_str("\n\nSYMPTOMS TO ANALYZE:\n");
    prompt.push_str(&bullet_list(symptoms, "No specific symptoms provided"));

    if let Some(context) = patient.and_then(patient_context) {
        prompt.push_str("\n\nPATIENT CONTEXT:\n");
        prompt.push_str(&context);
    }

    prompt.push_str(
        r#"

Answer in this structure:
1. POSSIBLE CONDITIONS, most likely first: name (phrased as "possible"), educational probability estimate, short description, severity (Low/Medium/High).
2. GENERAL RECOMMENDATIONS: when to seek care, general self-care, warning signs, lifestyle considerations.
3. ADDITIONAL INFORMATION: details that would help a healthcare provider, and questions to ask them.
4. DISCLAIMER: this is preliminary educational information; only a qualified provider can diagnose or plan treatment."#,
    );
    prompt
}

/// Prompt for interpreting an image description.
pub fn build_image_prompt(description: &str, kind: ImageKind) -> String {
    let kind_title = title_case(kind.as_str());
    let mut prompt = format!(
        "You are a health information assistant focused on {kind} image analysis. Review the image information below and give structured educational insights.\n\n",
        kind = kind.as_str()
    );
    prompt.push_str(RESTRICTION_RULES);
    prompt.push_str("\n- Results may be inaccurate and must not be relied on for medical decisions.");
    prompt.push_str(&format!(
        "\n\nIMAGE INFORMATION:\nType: {kind_title} Image\nDescription: {}\n",
        redact_credentials(description.trim())
    ));
    prompt.push_str(
        r#"
Answer in this structure:
1. VISUAL FINDINGS: key characteristics and notable patterns.
2. POSSIBLE CONDITIONS, most likely first: name (phrased as "may suggest"), educational confidence estimate, short description, urgency (Low/Medium/High/Urgent).
3. GENERAL RECOMMENDATIONS: when to seek an examination, what to monitor, general prevention.
4. RED FLAGS: signs that need immediate medical attention.
5. REMINDERS: the limits of automated image review and the need for a professional examination."#,
    );
    prompt
}

/// Prompt for revisiting an earlier analysis.
pub fn build_follow_up_prompt(
    previous_analysis: &str,
    new_symptoms: &[String],
    time_elapsed: Option<&str>,
) -> String {
    let mut prompt = String::from(
        "You are providing a follow-up to an earlier health information analysis.\n\n",
    );
    prompt.push_str(RESTRICTION_RULES);
    prompt.push_str("\n\nPREVIOUS ANALYSIS:\n");
    prompt.push_str(&redact_credentials(previous_analysis.trim()));
    prompt.push_str("\n\n");

    if let Some(elapsed) = time_elapsed.map(str::trim).filter(|t| !t.is_empty()) {
        prompt.push_str(&format!("TIME ELAPSED: {}\n", redact_credentials(elapsed)));
    }
    if new_symptoms.is_empty() {
        prompt.push_str("NO NEW SYMPTOMS REPORTED\n");
    } else {
        let listed: Vec<String> = new_symptoms.iter().map(|s| redact_credentials(s)).collect();
        prompt.push_str(&format!("NEW SYMPTOMS: {}\n", listed.join(", ")));
    }

    prompt.push_str(
        r#"
Give an updated educational analysis covering:
1. SYMPTOM PROGRESSION: what changed and why it matters.
2. UPDATED ASSESSMENT: revised possibilities and any change in urgency.
3. GENERAL RECOMMENDATIONS: updated care suggestions and monitoring.
4. NEXT STEPS: when to follow up with a provider and when to seek immediate care."#,
    );
    prompt
}

/// Prompt for triaging symptoms into IMMEDIATE / URGENT / NON-URGENT.
pub fn build_emergency_prompt(symptoms: &[String]) -> String {
    let listed: Vec<String> = symptoms
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(redact_credentials)
        .collect();

    let mut prompt = String::from(
        "EMERGENCY SYMPTOM ASSESSMENT\n\nYou are carrying out an urgent educational review of potentially serious symptoms.\n\n",
    );
    prompt.push_str(RESTRICTION_RULES);
    prompt.push_str("\n\nREPORTED SYMPTOMS:\n");
    if listed.is_empty() {
        prompt.push_str("None reported");
    } else {
        prompt.push_str(&listed.join(", "));
    }
    prompt.push_str(
        r#"

Provide:
1. EMERGENCY RISK LEVEL: IMMEDIATE (seek emergency care now), URGENT (within hours) or NON-URGENT (regular appointment).
2. REASONING: which symptoms drive the level.
3. IMMEDIATE ACTIONS: what to do now, who to contact, what information to have ready.
4. SEEK IMMEDIATE CARE IF: specific warning signs.

When in doubt, err on the side of caution and seek immediate medical care."#,
    );
    prompt
}

/// Prompt for general education on one health topic.
pub fn build_general_health_prompt(topic: &str) -> String {
    let mut prompt = format!(
        "You are providing general health education about: {}\n\n",
        redact_credentials(topic.trim())
    );
    prompt.push_str(RESTRICTION_RULES);
    prompt.push_str(
        r#"

Cover:
1. OVERVIEW: what the topic involves.
2. PREVENTION: lifestyle factors, wellness practices, risk factors.
3. WHEN TO SEEK CARE: signs that warrant a consultation, routine screening, emergency warning signs.
4. RESOURCES: reputable sources and questions to ask a healthcare provider.
5. REMINDERS: individual circumstances vary; providers give personalised advice."#,
    );
    prompt
}

// ═══════════════════════════════════════════
// Suffixes
// ═══════════════════════════════════════════

/// Ask for a reply language other than English and add cultural notes.
pub fn with_cultural_context(mut prompt: String, language: &str, considerations: Option<&str>) -> String {
    let language = language.trim();
    if !language.is_empty() && !language.eq_ignore_ascii_case("en") {
        prompt.push_str(&format!("\n\nPLEASE RESPOND IN: {}", language.to_uppercase()));
    }
    if let Some(notes) = considerations.map(str::trim).filter(|n| !n.is_empty()) {
        prompt.push_str(&format!("\n\nCULTURAL CONSIDERATIONS: {}", redact_credentials(notes)));
    }
    prompt
}

/// Add pediatric or geriatric guidance. Adults 18 to 65 get nothing extra.
pub fn with_age_context(mut prompt: String, age: Option<u32>) -> String {
    match age {
        Some(age) if age < PEDIATRIC_AGE => {
            prompt.push_str("\n\n");
            prompt.push_str(PEDIATRIC_CONTEXT);
        }
        Some(age) if age > GERIATRIC_AGE => {
            prompt.push_str("\n\n");
            prompt.push_str(GERIATRIC_CONTEXT);
        }
        _ => {}
    }
    prompt
}

/// Append the closing restriction block.
pub fn apply_content_restrictions(mut prompt: String) -> String {
    prompt.push_str("\n\n");
    prompt.push_str(CONTENT_RESTRICTIONS);
    prompt
}

fn patient_context(patient: &PatientInfo) -> Option<String> {
    let mut lines = Vec::new();
    if let Some(age) = patient.age {
        lines.push(format!("Age: {age}"));
    }
    if let Some(gender) = patient.gender.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
        lines.push(format!("Gender: {}", redact_credentials(gender)));
    }
    if let Some(history) = patient
        .medical_history
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
    {
        lines.push(format!("Medical History: {}", redact_credentials(history)));
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn bullet_list(items: &[String], empty: &str) -> String {
    let lines: Vec<String> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| format!("- {}", redact_credentials(s)))
        .collect();
    if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn symptom_prompt_lists_symptoms_and_rules() {
        let prompt = build_symptom_prompt(&items(&["fever", " ", "cough"]), None);
        assert!(prompt.contains("- fever\n- cough"));
        assert!(prompt.contains("Do NOT give definitive diagnoses"));
        assert!(!prompt.contains("PATIENT CONTEXT"));
    }

    #[test]
    fn symptom_prompt_without_symptoms() {
        let prompt = build_symptom_prompt(&[], None);
        assert!(prompt.contains("No specific symptoms provided"));
    }

    #[test]
    fn patient_context_is_included_and_redacted() {
        let patient = PatientInfo {
            age: Some(40),
            gender: None,
            medical_history: Some("asthma; my password is hunter2".into()),
        };
        let prompt = build_symptom_prompt(&items(&["cough"]), Some(&patient));
        assert!(prompt.contains("PATIENT CONTEXT:\nAge: 40\nMedical History: asthma; my [RESTRICTED] is hunter2"));
        assert!(!prompt.contains("password is"));
    }

    #[test]
    fn image_prompt_titles_the_kind() {
        let prompt = build_image_prompt("dark irregular mole", ImageKind::Mole);
        assert!(prompt.contains("Type: Mole Image"));
        assert!(prompt.contains("Description: dark irregular mole"));
        assert!(prompt.contains("RED FLAGS"));
    }

    #[test]
    fn follow_up_prompt_reports_new_symptoms() {
        let prompt = build_follow_up_prompt("Possible influenza", &items(&["rash", "chills"]), Some("3 days"));
        assert!(prompt.contains("TIME ELAPSED: 3 days"));
        assert!(prompt.contains("NEW SYMPTOMS: rash, chills"));

        let prompt = build_follow_up_prompt("Possible influenza", &[], None);
        assert!(prompt.contains("NO NEW SYMPTOMS REPORTED"));
        assert!(!prompt.contains("TIME ELAPSED"));
    }

    #[test]
    fn emergency_prompt_joins_symptoms() {
        let prompt = build_emergency_prompt(&items(&["chest pain", "", "sweating"]));
        assert!(prompt.contains("REPORTED SYMPTOMS:\nchest pain, sweating"));
        assert!(prompt.contains("IMMEDIATE"));
    }

    #[test]
    fn general_health_prompt_names_topic() {
        let prompt = build_general_health_prompt("sleep hygiene");
        assert!(prompt.starts_with("You are providing general health education about: sleep hygiene"));
    }

    #[test]
    fn cultural_context_skips_english() {
        let base = String::from("P");
        assert_eq!(with_cultural_context(base.clone(), "en", None), "P");
        let out = with_cultural_context(base, "fr", Some("prefers plain language"));
        assert!(out.contains("PLEASE RESPOND IN: FR"));
        assert!(out.ends_with("CULTURAL CONSIDERATIONS: prefers plain language"));
    }

    #[test]
    fn age_context_brackets() {
        assert!(with_age_context("P".into(), Some(10)).contains("PEDIATRIC"));
        assert!(with_age_context("P".into(), Some(70)).contains("GERIATRIC"));
        assert_eq!(with_age_context("P".into(), Some(18)), "P");
        assert_eq!(with_age_context("P".into(), Some(65)), "P");
        assert_eq!(with_age_context("P".into(), None), "P");
    }

    #[test]
    fn restrictions_close_the_prompt() {
        let out = apply_content_restrictions("P".into());
        assert!(out.starts_with("P\n\nIMPORTANT CONTENT RESTRICTIONS:"));
        assert!(out.ends_with(CONTENT_RESTRICTIONS));
    }
}
