//! Bundled knowledge tables.
//!
//! These are placeholder heuristics, not clinical data. Keywords may be
//! written informally; the matchers canonicalise them before comparing.

use std::collections::BTreeMap;

use crate::models::enums::Severity;
use crate::models::{Condition, DiseaseInfo, SkinCondition};

use super::{AbcdKeywords, BodyLocation, KnowledgeBase};

pub fn builtin() -> KnowledgeBase {
    KnowledgeBase {
        conditions: conditions(),
        skin_conditions: skin_conditions(),
        disease_info: disease_info(),
        high_risk_symptoms: strings(&[
            "chest pain",
            "shortness of breath",
            "severe headache",
            "high fever",
            "severe abdominal pain",
        ]),
        body_locations: body_locations(),
        abcd: abcd_keywords(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn condition(
    name: &str,
    keywords: &[&str],
    base_confidence: f64,
    severity: Severity,
    description: &str,
    recommendations: &[&str],
) -> Condition {
    Condition {
        name: name.into(),
        keywords: strings(keywords),
        base_confidence,
        severity,
        description: description.into(),
        recommendations: strings(recommendations),
    }
}

#[allow(clippy::too_many_arguments)]
fn skin(
    name: &str,
    indicators: &[&str],
    common_locations: &[&str],
    base_confidence: f64,
    severity: Severity,
    pigmented: bool,
    description: &str,
    recommendations: &[&str],
) -> SkinCondition {
    SkinCondition {
        name: name.into(),
        indicators: strings(indicators),
        common_locations: strings(common_locations),
        base_confidence,
        severity,
        description: description.into(),
        recommendations: strings(recommendations),
        pigmented,
    }
}

// ═══════════════════════════════════════════
// Symptom conditions (table order breaks ties)
// ═══════════════════════════════════════════

fn conditions() -> Vec<Condition> {
    vec![
        condition(
            "Common Cold",
            &["runny nose", "congestion", "sneezing", "cough", "sore throat", "mild fever"],
            75.0,
            Severity::Low,
            "A viral infection of the upper respiratory tract that commonly affects the nose and throat.",
            &["Rest and drink plenty of fluids", "Use saline nasal spray for congestion"],
        ),
        condition(
            "Influenza",
            &[
                "fever", "high fever", "body aches", "muscle pain",
                "fatigue", "headache", "cough", "chills",
            ],
            85.0,
            Severity::Medium,
            "A viral infection that attacks the respiratory system, causing fever, aches, and fatigue.",
            &[
                "Rest and stay home to avoid spreading the infection",
                "Ask a healthcare provider about antiviral treatment if symptoms started recently",
            ],
        ),
        condition(
            "COVID-19",
            &[
                "fever", "cough", "fatigue", "loss of taste",
                "loss of smell", "shortness of breath", "sore throat",
            ],
            80.0,
            Severity::Medium,
            "A respiratory illness caused by the SARS-CoV-2 coronavirus.",
            &["Consider taking a COVID-19 test", "Limit contact with others until symptoms resolve"],
        ),
        condition(
            "Migraine",
            &["headache", "nausea", "vomiting", "visual disturbances", "sensitivity to light"],
            80.0,
            Severity::Medium,
            "A neurological condition characterized by severe headaches, often with nausea and sensitivity to light.",
            &["Rest in a quiet, dark room", "Keep a headache diary to identify triggers"],
        ),
        condition(
            "Gastroenteritis",
            &["nausea", "vomiting", "diarrhea", "abdominal pain", "fever"],
            75.0,
            Severity::Medium,
            "Inflammation of the stomach and intestines, typically causing vomiting and diarrhea.",
            &["Sip fluids frequently to prevent dehydration", "Eat bland foods as tolerated"],
        ),
        condition(
            "Allergic Reaction",
            &["rash", "itching", "sneezing", "watery eyes", "swelling"],
            70.0,
            Severity::Low,
            "An immune system response to a substance that the body perceives as harmful.",
            &["Avoid the suspected trigger", "Watch for swelling of the face or throat"],
        ),
        condition(
            "Hypertension",
            &["headache", "dizziness", "chest pain", "shortness of breath", "blurred vision"],
            60.0,
            Severity::Medium,
            "High blood pressure that can lead to serious health complications if left untreated.",
            &["Have your blood pressure checked", "Reduce salt intake"],
        ),
        condition(
            "Urinary Tract Infection",
            &["painful urination", "frequent urination", "abdominal pain", "fever", "cloudy urine"],
            85.0,
            Severity::Medium,
            "A bacterial infection affecting any part of the urinary system.",
            &["Drink plenty of water", "See a healthcare provider for a urine test"],
        ),
        condition(
            "Bronchial Asthma",
            &["shortness of breath", "wheezing", "chest tightness", "cough"],
            75.0,
            Severity::Medium,
            "A chronic condition in which the airways narrow and swell, making breathing difficult.",
            &["Avoid known triggers such as smoke and dust", "Keep your inhaler within reach if you have one"],
        ),
        condition(
            "Possible Cardiac Event",
            &["chest pain", "shortness of breath", "left arm pain", "sweating", "nausea"],
            95.0,
            Severity::High,
            "A group of symptoms that can be associated with heart problems and needs prompt evaluation.",
            &["Call emergency services if chest pain is severe or persistent"],
        ),
    ]
}

// ═══════════════════════════════════════════
// Skin conditions
// ═══════════════════════════════════════════

fn skin_conditions() -> Vec<SkinCondition> {
    vec![
        skin(
            "Fungal Infection (Ringworm)",
            &["ring", "ring shaped", "circular", "itchy", "scaly", "red border", "rash", "peeling"],
            &["foot", "groin", "scalp", "arm", "leg", "chest", "back"],
            80.0,
            Severity::Low,
            false,
            "A common fungal skin infection that forms ring-shaped, itchy patches.",
            &["Keep the area clean and dry", "Avoid sharing towels or clothing"],
        ),
        skin(
            "Eczema",
            &["dry", "itchy", "red patches", "rash", "cracked", "flaky", "inflamed"],
            &["hand", "face", "neck", "arm", "leg"],
            75.0,
            Severity::Low,
            false,
            "A condition that makes skin red, inflamed and itchy, often in recurring flares.",
            &["Moisturize the skin regularly", "Use gentle, fragrance-free soaps"],
        ),
        skin(
            "Psoriasis",
            &["silvery scales", "thick", "plaques", "scaly", "red patches", "itchy"],
            &["scalp", "back", "arm", "leg"],
            70.0,
            Severity::Medium,
            false,
            "A chronic autoimmune condition causing thick, scaly patches of skin.",
            &["Keep skin moisturized", "Discuss long-term management with a dermatologist"],
        ),
        skin(
            "Acne",
            &["pimples", "blackheads", "whiteheads", "oily", "bumps", "pustules"],
            &["face", "back", "chest"],
            80.0,
            Severity::Low,
            false,
            "A skin condition that occurs when hair follicles become clogged with oil and dead skin cells.",
            &["Wash the affected area gently twice a day", "Avoid squeezing or picking spots"],
        ),
        skin(
            "Melanoma Warning Signs",
            &[
                "mole", "asymmetric", "irregular border", "multiple colors",
                "dark", "growing", "changing", "bleeding",
            ],
            &["back", "leg", "arm", "face", "chest"],
            85.0,
            Severity::High,
            true,
            "Changes in a mole that can be associated with skin cancer and should be examined promptly.",
            &["Arrange a skin examination with a dermatologist soon", "Photograph the mole to track changes"],
        ),
        skin(
            "Benign Mole",
            &["mole", "round", "uniform color", "small", "smooth", "brown"],
            &["face", "back", "arm", "leg", "chest"],
            70.0,
            Severity::Low,
            true,
            "A common, usually harmless growth of pigment cells.",
            &["Check moles monthly for changes in size, shape or color"],
        ),
        skin(
            "Contact Dermatitis",
            &["red", "rash", "itchy", "blisters", "burning", "swelling"],
            &["hand", "face", "arm", "neck"],
            70.0,
            Severity::Low,
            false,
            "A red, itchy rash caused by direct contact with a substance or allergen.",
            &["Identify and avoid the irritant", "Apply cool compresses to soothe the skin"],
        ),
        skin(
            "Hives (Urticaria)",
            &["hives", "welts", "raised", "itchy", "swelling", "bumps"],
            &["chest", "back", "arm", "leg", "face"],
            70.0,
            Severity::Medium,
            false,
            "Raised, itchy welts on the skin, often triggered by an allergic reaction.",
            &["Avoid known triggers", "Seek care at once if lips or throat swell"],
        ),
        skin(
            "Diabetic Foot Ulcer",
            &["ulcer", "wound", "open sore", "slow healing", "diabetic", "drainage"],
            &["foot"],
            85.0,
            Severity::High,
            false,
            "An open sore or wound, typically on the bottom of the foot, common in people with diabetes.",
            &["Keep the wound clean and covered", "See a healthcare provider about wound care promptly"],
        ),
    ]
}

// ═══════════════════════════════════════════
// Supporting tables
// ═══════════════════════════════════════════

fn disease_info() -> BTreeMap<String, DiseaseInfo> {
    let entries = [
        (
            "Common Cold",
            "A viral infection of the upper respiratory tract",
            "Low",
            "7-10 days",
            "Rest, fluids, over-the-counter remedies for symptom relief",
        ),
        (
            "Influenza",
            "A viral infection that attacks the respiratory system",
            "Medium",
            "1-2 weeks",
            "Rest, fluids, antiviral treatment if started early",
        ),
        (
            "Migraine",
            "A neurological condition characterized by severe headaches",
            "Medium",
            "4-72 hours per episode",
            "Pain relief, preventive care, lifestyle changes",
        ),
        (
            "Gastroenteritis",
            "Inflammation of the stomach and intestines",
            "Medium",
            "1-3 days",
            "Hydration, rest, bland diet",
        ),
    ];
    entries
        .into_iter()
        .map(|(name, description, severity, duration, treatment)| {
            (
                name.to_string(),
                DiseaseInfo {
                    description: description.into(),
                    severity: severity.into(),
                    typical_duration: duration.into(),
                    treatment: treatment.into(),
                },
            )
        })
        .collect()
}

fn body_locations() -> Vec<BodyLocation> {
    let table: &[(&str, &[&str])] = &[
        ("face", &["face", "cheek", "forehead", "nose", "chin", "lip"]),
        ("scalp", &["scalp", "head", "hairline"]),
        ("neck", &["neck"]),
        ("chest", &["chest", "breast", "torso"]),
        ("back", &["back", "shoulder blade", "spine"]),
        ("arm", &["arm", "arms", "elbow", "forearm", "wrist", "shoulder"]),
        ("hand", &["hand", "hands", "finger", "fingers", "palm"]),
        ("groin", &["groin", "inner thigh"]),
        ("leg", &["leg", "legs", "knee", "thigh", "shin", "calf"]),
        ("foot", &["foot", "feet", "toe", "toes", "heel", "ankle", "sole"]),
    ];
    table
        .iter()
        .map(|(name, keywords)| BodyLocation {
            name: (*name).to_string(),
            keywords: strings(keywords),
        })
        .collect()
}

fn abcd_keywords() -> AbcdKeywords {
    AbcdKeywords {
        lesion: strings(&["mole", "spot", "lesion", "freckle", "birthmark", "nevus", "growth"]),
        asymmetry: strings(&[
            "asymmetric", "asymmetrical", "uneven shape", "irregular shape", "lopsided",
        ]),
        border: strings(&[
            "irregular border", "jagged", "blurred edges", "blurry edges", "notched",
            "ragged", "uneven border", "poorly defined",
        ]),
        color: strings(&["black", "brown", "tan", "red", "pink", "white", "blue", "gray"]),
        diameter: strings(&[
            "large", "larger", "growing", "bigger", "enlarging", "6mm",
            "pencil eraser", "wide",
        ]),
    }
}
