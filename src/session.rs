//! Application context and the signed-in user.
//!
//! Credential storage belongs to an external auth service; this module only
//! validates form input and holds the session once the caller signs in.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::{AnalysisError, Analyzer};
use crate::chat::{ChatResponder, ChatSession};
use crate::config::{self, ClassifierConfig};
use crate::knowledge::{self, KnowledgeBase};
use crate::matching::SymptomMatcher;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

// ═══════════════════════════════════════════
// Forms and validation
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every violation found in a form, in field order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid form: {}", summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn for_field(&self, field: &str) -> Option<&'static str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

#[derive(Default)]
struct Collector(Vec<FieldError>);

impl Collector {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    fn email(&mut self, email: &str) {
        let email = email.trim();
        if email.is_empty() {
            self.push("email", "Email is required");
        } else if !EMAIL_PATTERN.is_match(email) {
            self.push("email", "Please enter a valid email address");
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors: self.0 })
        }
    }
}

pub fn validate_login(form: &LoginForm) -> Result<(), ValidationErrors> {
    let mut c = Collector::default();
    c.email(&form.email);
    if form.password.is_empty() {
        c.push("password", "Password is required");
    }
    c.finish()
}

pub fn validate_registration(form: &RegistrationForm) -> Result<(), ValidationErrors> {
    let mut c = Collector::default();
    if form.name.trim().is_empty() {
        c.push("name", "Name is required");
    }
    c.email(&form.email);
    if form.password.is_empty() {
        c.push("password", "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        c.push("password", "Password must be at least 6 characters");
    }
    if form.confirm_password != form.password {
        c.push("confirm_password", "Passwords do not match");
    }
    c.finish()
}

// ═══════════════════════════════════════════
// Session
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub profile_image: Option<String>,
}

impl UserSession {
    fn new(email: &str, display_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.trim().to_lowercase(),
            display_name: display_name.trim().to_string(),
            profile_image: None,
        }
    }
}

/// Everything the presentation layer needs, created once at start-up.
pub struct AppContext {
    config: ClassifierConfig,
    knowledge: Arc<KnowledgeBase>,
    session: Option<UserSession>,
}

impl AppContext {
    pub fn new(knowledge: Arc<KnowledgeBase>, config: ClassifierConfig) -> Self {
        Self {
            config,
            knowledge,
            session: None,
        }
    }

    /// Config from `CARELENS_*` variables and the knowledge base from the
    /// app data directory, falling back to the bundled tables.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let config = ClassifierConfig::from_env()?;
        let knowledge = knowledge::load_or_builtin(&config::knowledge_base_path())?;
        tracing::info!(
            app = config::APP_NAME,
            version = config::APP_VERSION,
            conditions = knowledge.conditions.len(),
            "Application context ready"
        );
        Ok(Self::new(Arc::new(knowledge), config))
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn knowledge(&self) -> Arc<KnowledgeBase> {
        self.knowledge.clone()
    }

    pub fn session(&self) -> Option<&UserSession> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Validate the form and open a session. The display name defaults to
    /// the local part of the email.
    pub fn login(&mut self, form: &LoginForm) -> Result<&UserSession, ValidationErrors> {
        validate_login(form)?;
        let email = form.email.trim();
        let name = email.split('@').next().unwrap_or(email);
        Ok(self.open(UserSession::new(email, name)))
    }

    pub fn register(&mut self, form: &RegistrationForm) -> Result<&UserSession, ValidationErrors> {
        validate_registration(form)?;
        Ok(self.open(UserSession::new(&form.email, &form.name)))
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(session_id = %session.id, "Session closed");
        }
    }

    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new(self.knowledge.clone(), self.config.clone())
    }

    pub fn chat(&self) -> ChatSession {
        ChatSession::new(ChatResponder::new(SymptomMatcher::new(
            self.knowledge.clone(),
            self.config.clone(),
        )))
    }

    fn open(&mut self, session: UserSession) -> &UserSession {
        tracing::info!(session_id = %session.id, "Session opened");
        self.session.insert(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SymptomSelection;

    fn context() -> AppContext {
        AppContext::new(Arc::new(KnowledgeBase::builtin()), ClassifierConfig::default())
    }

    fn registration(name: &str, email: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn login_requires_email_and_password() {
        let err = validate_login(&LoginForm::default()).unwrap_err();
        assert_eq!(err.for_field("email"), Some("Email is required"));
        assert_eq!(err.for_field("password"), Some("Password is required"));
    }

    #[test]
    fn login_rejects_malformed_email() {
        let form = LoginForm {
            email: "not-an-email".into(),
            password: "secret".into(),
        };
        let err = validate_login(&form).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.for_field("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn registration_reports_all_violations() {
        let err = validate_registration(&registration(" ", "a@b", "12345", "54321")).unwrap_err();
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "password", "confirm_password"]);
        assert!(err.to_string().starts_with("Invalid form: name: Name is required"));
    }

    #[test]
    fn registration_accepts_valid_form() {
        assert!(validate_registration(&registration("Sam", "sam@example.com", "abcdef", "abcdef")).is_ok());
    }

    #[test]
    fn login_and_logout_lifecycle() {
        let mut ctx = context();
        assert!(!ctx.is_signed_in());
        let session = ctx
            .login(&LoginForm {
                email: " Sam@Example.com ".into(),
                password: "pw".into(),
            })
            .unwrap()
            .clone();
        assert_eq!(session.email, "sam@example.com");
        assert_eq!(session.display_name, "Sam");
        assert_eq!(ctx.session(), Some(&session));
        ctx.logout();
        assert!(ctx.session().is_none());
    }

    #[test]
    fn failed_login_keeps_previous_state() {
        let mut ctx = context();
        assert!(ctx.login(&LoginForm::default()).is_err());
        assert!(!ctx.is_signed_in());
    }

    #[test]
    fn register_uses_given_name() {
        let mut ctx = context();
        let session = ctx
            .register(&registration("Alex Doe", "alex@example.com", "abcdef", "abcdef"))
            .unwrap();
        assert_eq!(session.display_name, "Alex Doe");
        assert!(session.profile_image.is_none());
    }

    #[test]
    fn context_builds_working_components() {
        let ctx = context();
        let report = ctx.analyzer().analyze_symptoms(&["headache".to_string()], None);
        assert!(!report.conditions.is_empty());
        let mut chat = ctx.chat();
        let reply = chat.send("hello", &SymptomSelection::new());
        assert!(!reply.text.is_empty());
    }
}
