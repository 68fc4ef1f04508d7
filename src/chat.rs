//! Chat responder: keyword intent detection over one free-text line.
//!
//! Builds on top of:
//! - `matching::SymptomMatcher` (ranking for detected symptoms)
//! - `emergency` (phrases that short-circuit to emergency guidance)
//! - `safety` (every reply is softened before it leaves this module)
//!
//! The responder is stateless; `ChatSession` owns the append-only log.

use serde::{Deserialize, Serialize};

use crate::emergency::is_emergency_symptom;
use crate::matching::SymptomMatcher;
use crate::models::enums::{ChatIntent, Sender};
use crate::models::{ChatMessage, ClassificationResult, SymptomSelection};
use crate::normalize::{contains_phrase, normalize_phrase};
use crate::safety::soften_language;

// ═══════════════════════════════════════════
// Keyword tables
// ═══════════════════════════════════════════

/// Canonical symptom key → normalised phrases that signal it. Phrases match
/// whole words only, so "kitchen" never reads as "itch".
const SYMPTOM_FAMILIES: &[(&str, &[&str])] = &[
    ("fever", &["fever", "fevers", "feverish", "temperature"]),
    ("chills", &["chills", "shivering", "shivers"]),
    ("cough", &["cough", "coughs", "coughing", "coughed"]),
    ("sore throat", &["sore throat", "throat hurts", "scratchy throat"]),
    ("runny nose", &["runny nose"]),
    ("congestion", &["stuffy", "congested", "congestion", "blocked nose"]),
    ("sneezing", &["sneeze", "sneezes", "sneezing", "sneezed"]),
    ("headache", &["headache", "headaches", "migraine", "migraines"]),
    ("body aches", &["body ache", "body aches", "aching all over"]),
    ("muscle pain", &["muscle ache", "muscle aches", "muscle pain", "sore muscles"]),
    ("fatigue", &["tired", "fatigue", "fatigued", "exhausted", "no energy"]),
    ("nausea", &["nausea", "nauseous", "nauseated", "queasy"]),
    ("vomiting", &["vomit", "vomiting", "vomited", "throwing up", "threw up"]),
    ("diarrhea", &["diarrhea", "diarrhoea", "loose stool", "loose stools"]),
    ("dizziness", &["dizzy", "dizziness", "lightheaded", "light headed"]),
    ("rash", &["rash", "rashes", "hives"]),
    ("itching", &["itch", "itches", "itchy", "itching", "itchiness"]),
    ("wheezing", &["wheeze", "wheezes", "wheezing", "wheezy"]),
    ("loss of smell", &["cant smell", "cannot smell", "loss of smell"]),
    ("loss of taste", &["cant taste", "cannot taste", "loss of taste"]),
    ("painful urination", &["burns when i pee", "painful urination", "burning urination"]),
];

const PAIN_WORDS: &[&str] = &[
    "pain", "pains", "painful", "hurt", "hurts", "hurting", "ache", "aches", "aching", "achy",
    "sore",
];

/// Body-site word → canonical pain symptom, checked when a pain word is present.
const PAIN_SITES: &[(&str, &str)] = &[
    ("chest", "chest pain"),
    ("stomach", "abdominal pain"),
    ("belly", "abdominal pain"),
    ("tummy", "abdominal pain"),
    ("abdomen", "abdominal pain"),
    ("head", "headache"),
    ("throat", "sore throat"),
    ("muscle", "muscle pain"),
    ("muscles", "muscle pain"),
    ("back", "back pain"),
    ("joint", "joint pain"),
    ("joints", "joint pain"),
];

/// Colloquial emergency phrasing not covered by symptom keys, normalised.
const EMERGENCY_PHRASES: &[&str] = &[
    "passed out",
    "not breathing",
    "heart attack",
    "overdose",
    "overdosed",
    "cant wake",
    "cannot wake",
];

const GREETING_WORDS: &[&str] = &["hi", "hello", "hey", "good morning", "good afternoon", "good evening"];
const THANKS_WORDS: &[&str] = &["thank", "thanks", "thank you", "thx", "appreciate", "appreciated"];
const IMAGE_WORDS: &[&str] = &["upload", "photo", "picture", "image", "scan"];
const HELP_WORDS: &[&str] = &["help", "not sure", "what should i do", "confused", "advice"];

// ═══════════════════════════════════════════
// Canned replies
// ═══════════════════════════════════════════

const EMERGENCY_REPLY: &str = "What you describe may need emergency care. Please call your local emergency number or go to the nearest emergency department now. Do not wait for symptoms to improve.";
const GREETING_REPLY: &str = "Hello! I can help you think through symptoms. Tell me how you're feeling, or select symptoms in the checker.";
const THANKS_REPLY: &str = "You're welcome. If anything changes or new symptoms appear, let me know. A healthcare provider can give you a proper assessment.";
const IMAGE_HELP_REPLY: &str = "You can upload a clear, well-lit photo of the affected skin area in the image analysis section. Add a short description of what you see, such as colour, shape and where it is on your body.";
const PAIN_CLARIFY_REPLY: &str = "I'm sorry you're in pain. Where exactly does it hurt, and how long has it been going on?";
const CLARIFY_REPLY: &str = "I'd like to help. Could you describe your main symptoms, when they started and how severe they are?";
const FALLBACK_REPLY: &str = "I'm not sure I understood. You can describe symptoms such as fever, cough or headache, or ask about uploading a photo of a skin concern.";

// ═══════════════════════════════════════════
// Responder
// ═══════════════════════════════════════════

/// One assistant turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub intent: ChatIntent,
    pub text: String,
    /// Canonical symptom keys found in this line, for the caller to merge
    /// into its selection.
    pub detected_symptoms: Vec<String>,
    pub top_result: Option<ClassificationResult>,
}

#[derive(Debug, Clone)]
pub struct ChatResponder {
    matcher: SymptomMatcher,
}

impl ChatResponder {
    pub fn new(matcher: SymptomMatcher) -> Self {
        Self { matcher }
    }

    /// Answer one user line. Never fails; unrecognised input gets the
    /// generic fallback reply.
    pub fn respond(&self, line: &str, selection: &SymptomSelection) -> ChatReply {
        let words = normalize_phrase(line);
        let detected = detect_symptoms(&words);

        let intent = classify_intent(&words, &detected);
        tracing::debug!(intent = %intent, detected = detected.len(), "Chat intent classified");

        let (text, top_result) = match intent {
            ChatIntent::Symptoms => {
                let (text, top) = self.describe_match(selection, &detected);
                (text, Some(top))
            }
            ChatIntent::Emergency => (EMERGENCY_REPLY.to_string(), None),
            ChatIntent::Greeting => (GREETING_REPLY.to_string(), None),
            ChatIntent::Thanks => (THANKS_REPLY.to_string(), None),
            ChatIntent::ImageHelp => (IMAGE_HELP_REPLY.to_string(), None),
            ChatIntent::Clarify if has_pain_word(&words) => (PAIN_CLARIFY_REPLY.to_string(), None),
            ChatIntent::Clarify => (CLARIFY_REPLY.to_string(), None),
            ChatIntent::Fallback => (FALLBACK_REPLY.to_string(), None),
        };

        ChatReply {
            intent,
            text: soften_language(&text),
            detected_symptoms: detected,
            top_result,
        }
    }

    fn describe_match(
        &self,
        selection: &SymptomSelection,
        detected: &[String],
    ) -> (String, ClassificationResult) {
        let mut symptoms = selection.match_texts();
        for key in detected {
            if !symptoms.contains(key) {
                symptoms.push(key.clone());
            }
        }

        let ranked = self.matcher.match_symptoms(&symptoms);
        let top = ranked
            .into_iter()
            .next()
            .unwrap_or_else(|| crate::matching::fallback_result(self.matcher.config(), &symptoms));

        let listed = symptoms.join(", ");
        let text = if top.is_fallback() {
            format!(
                "Thanks for describing your symptoms ({listed}). They don't clearly match a common pattern, so a healthcare provider is the best person to evaluate them."
            )
        } else {
            format!(
                "Based on what you've described ({listed}), your symptoms may be consistent with {} ({:.1}% match). {} This is not a diagnosis; please consult a healthcare provider for a proper evaluation.",
                top.condition, top.probability, top.description
            )
        };
        (text, top)
    }
}

/// Pick the intent for a line. `words` is the `normalize_phrase` form of
/// the line. Emergencies win over everything else.
pub fn classify_intent(words: &str, detected: &[String]) -> ChatIntent {
    if is_emergency_line(words, detected) {
        return ChatIntent::Emergency;
    }
    if IMAGE_WORDS.iter().any(|w| contains_phrase(words, w)) {
        return ChatIntent::ImageHelp;
    }
    if !detected.is_empty() {
        return ChatIntent::Symptoms;
    }
    if has_pain_word(words) || HELP_WORDS.iter().any(|w| contains_phrase(words, w)) {
        return ChatIntent::Clarify;
    }
    if GREETING_WORDS.iter().any(|w| contains_phrase(words, w)) {
        return ChatIntent::Greeting;
    }
    if THANKS_WORDS.iter().any(|w| contains_phrase(words, w)) {
        return ChatIntent::Thanks;
    }
    ChatIntent::Fallback
}

/// Canonical symptom keys mentioned in a line, in table order, no duplicates.
pub fn detect_symptoms(words: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut push = |key: &str| {
        if !found.iter().any(|f| f == key) {
            found.push(key.to_string());
        }
    };

    for (key, patterns) in SYMPTOM_FAMILIES {
        if patterns.iter().any(|p| contains_phrase(words, p)) {
            push(*key);
        }
    }

    if has_pain_word(words) {
        for (site, key) in PAIN_SITES {
            if contains_phrase(words, site) {
                push(*key);
            }
        }
    }

    found
}

fn has_pain_word(words: &str) -> bool {
    words
        .split(' ')
        .any(|w| PAIN_WORDS.contains(&w))
}

fn is_emergency_line(words: &str, detected: &[String]) -> bool {
    EMERGENCY_PHRASES.iter().any(|p| contains_phrase(words, p))
        || is_emergency_symptom(words)
        || detected.iter().any(|d| is_emergency_symptom(d))
}

// ═══════════════════════════════════════════
// Session log
// ═══════════════════════════════════════════

/// Append-only message log for one chat session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    responder: ChatResponder,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(responder: ChatResponder) -> Self {
        Self {
            responder,
            messages: vec![ChatMessage::new(Sender::Assistant, GREETING_REPLY)],
        }
    }

    /// Record a user line and the assistant's answer; returns the reply.
    pub fn send(&mut self, text: &str, selection: &SymptomSelection) -> ChatReply {
        self.messages.push(ChatMessage::new(Sender::User, text));
        let reply = self.responder.respond(text, selection);
        self.messages
            .push(ChatMessage::new(Sender::Assistant, reply.text.clone()));
        reply
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ClassifierConfig;
    use crate::knowledge::KnowledgeBase;
    use crate::models::SelectedSymptom;

    fn responder() -> ChatResponder {
        ChatResponder::new(SymptomMatcher::new(
            Arc::new(KnowledgeBase::builtin()),
            ClassifierConfig::default(),
        ))
    }

    fn reply(line: &str) -> ChatReply {
        responder().respond(line, &SymptomSelection::new())
    }

    #[test]
    fn symptom_line_delegates_to_matcher() {
        let r = reply("I've had a fever and a bad cough, and my body aches");
        assert_eq!(r.intent, ChatIntent::Symptoms);
        assert_eq!(r.detected_symptoms, vec!["fever", "cough", "body aches"]);
        let top = r.top_result.unwrap();
        assert_eq!(top.condition, "Influenza");
        assert!(r.text.contains("Influenza"));
        assert!(r.text.contains("not a diagnosis"));
    }

    #[test]
    fn selection_is_merged_with_detected_symptoms() {
        let mut selection = SymptomSelection::new();
        selection.add(SelectedSymptom::canonical("body aches"));
        selection.add(SelectedSymptom::canonical("chills"));
        let r = responder().respond("now I have a fever too", &selection);
        assert_eq!(r.detected_symptoms, vec!["fever"]);
        assert_eq!(r.top_result.unwrap().condition, "Influenza");
        assert!(r.text.contains("body aches, chills, fever"));
    }

    #[test]
    fn pain_site_maps_to_canonical_key() {
        let r = reply("my stomach hurts");
        assert_eq!(r.intent, ChatIntent::Symptoms);
        assert_eq!(r.detected_symptoms, vec!["abdominal pain"]);
    }

    #[test]
    fn pain_without_site_asks_where() {
        let r = reply("it really hurts");
        assert_eq!(r.intent, ChatIntent::Clarify);
        assert_eq!(r.text, PAIN_CLARIFY_REPLY);
    }

    #[test]
    fn emergency_short_circuits() {
        for line in ["I can't breathe", "my chest hurts", "he passed out", "crushing chest pain"] {
            let r = reply(line);
            assert_eq!(r.intent, ChatIntent::Emergency, "line: {line}");
            assert!(r.top_result.is_none());
            assert!(r.text.contains("emergency"));
        }
    }

    #[test]
    fn canned_branches() {
        assert_eq!(reply("Hello there").intent, ChatIntent::Greeting);
        assert_eq!(reply("thanks a lot").intent, ChatIntent::Thanks);
        assert_eq!(reply("How do I upload a photo of my rash?").intent, ChatIntent::ImageHelp);
        assert_eq!(reply("I'm not sure what to do").intent, ChatIntent::Clarify);
    }

    #[test]
    fn symptom_words_inside_other_words_are_ignored() {
        let r = reply("thanks, I'm cooking in the kitchen");
        assert_eq!(r.intent, ChatIntent::Thanks);
        assert!(r.detected_symptoms.is_empty());

        let r = reply("I spent the day painting the fence");
        assert_eq!(r.intent, ChatIntent::Fallback);
        assert!(r.detected_symptoms.is_empty());
    }

    #[test]
    fn inflected_symptom_words_still_match() {
        let r = reply("I keep sneezing and my arms are itchy");
        assert_eq!(r.detected_symptoms, vec!["sneezing", "itching"]);
    }

    #[test]
    fn greeting_needs_whole_word() {
        assert_eq!(reply("this").intent, ChatIntent::Fallback);
    }

    #[test]
    fn unknown_and_empty_lines_fall_back() {
        assert_eq!(reply("purple elephants").intent, ChatIntent::Fallback);
        let r = reply("");
        assert_eq!(r.intent, ChatIntent::Fallback);
        assert!(r.detected_symptoms.is_empty());
        assert!(!r.text.is_empty());
    }

    #[test]
    fn unmatched_symptoms_get_consultation_reply() {
        let r = reply("my back hurts");
        assert_eq!(r.detected_symptoms, vec!["back pain"]);
        assert!(r.top_result.unwrap().is_fallback());
        assert!(r.text.contains("healthcare provider"));
    }

    #[test]
    fn session_log_is_append_only() {
        let mut session = ChatSession::new(responder());
        assert_eq!(session.messages().len(), 1);
        session.send("hi", &SymptomSelection::new());
        session.send("I feel dizzy", &SymptomSelection::new());
        let senders: Vec<Sender> = session.messages().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![
                Sender::Assistant,
                Sender::User,
                Sender::Assistant,
                Sender::User,
                Sender::Assistant,
            ]
        );
        assert_eq!(session.messages()[3].text, "I feel dizzy");
    }
}
