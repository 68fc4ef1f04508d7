//! Analysis pipeline: one entry point per screen of the application.
//!
//! `Analyzer` wires the knowledge base, matchers, recommendation selector
//! and optional simulated classifier together. Heuristic steps never fail;
//! only upload validation and start-up loading return errors.

use std::sync::Arc;

use chrono::Local;
use thiserror::Error;

use crate::classifier::{
    combine_predictions, Classifier, ClassifierInput, RuleBasedClassifier, SimulatedCnnClassifier,
};
use crate::config::{ClassifierConfig, ConfigError};
use crate::emergency;
use crate::insights::health_insights;
use crate::knowledge::{KnowledgeBase, KnowledgeError};
use crate::matching::{referral_result, round1, ImageMatcher};
use crate::models::enums::ImageKind;
use crate::models::{
    ClassificationResult, DiseaseInfo, ImageReport, ImageUpload, PatientInfo, SymptomReport,
};
use crate::prompt::{
    apply_content_restrictions, build_image_prompt, build_symptom_prompt, with_age_context,
};
use crate::recommend::RecommendationSelector;
use crate::safety::{filter_recommendations, safe_treatment, soften_language};

/// Overall confidence never reads higher than this.
const MAX_OVERALL_CONFIDENCE: f64 = 95.0;

const SERVICE_UNAVAILABLE: &str =
    "The analysis service is temporarily unavailable. Please try again later.";

// ═══════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════

#[derive(Error, Debug, PartialEq)]
pub enum UploadError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Uploaded file is empty: {0}")]
    Empty(String),

    #[error("File too large: {size} bytes (maximum {max})")]
    TooLarge { size: u64, max: u64 },
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AnalysisError {
    /// Text safe to show an end user. Upload problems are actionable;
    /// everything else collapses to a generic unavailability notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Upload(UploadError::UnsupportedType(_)) => {
                "Please upload image files only (for example JPEG or PNG).".to_string()
            }
            Self::Upload(UploadError::Empty(_)) => "The selected file is empty.".to_string(),
            Self::Upload(UploadError::TooLarge { max, .. }) => {
                format!("Images must be smaller than {}.", format_size(*max))
            }
            Self::Knowledge(_) | Self::Config(_) => SERVICE_UNAVAILABLE.to_string(),
        }
    }
}

/// Check an upload's type and size; returns the effective MIME type.
pub fn validate_upload(upload: &ImageUpload, config: &ClassifierConfig) -> Result<String, UploadError> {
    let mime = upload.effective_mime().unwrap_or_default();
    if !mime.starts_with("image/") {
        let shown = if mime.is_empty() { "unknown".to_string() } else { mime };
        return Err(UploadError::UnsupportedType(shown));
    }
    if upload.size_bytes == 0 {
        return Err(UploadError::Empty(upload.file_name.clone()));
    }
    if upload.size_bytes > config.max_upload_bytes {
        return Err(UploadError::TooLarge {
            size: upload.size_bytes,
            max: config.max_upload_bytes,
        });
    }
    Ok(mime)
}

// ═══════════════════════════════════════════
// Analyzer
// ═══════════════════════════════════════════

pub struct Analyzer {
    kb: Arc<KnowledgeBase>,
    config: ClassifierConfig,
    rules: RuleBasedClassifier,
    images: ImageMatcher,
    selector: RecommendationSelector,
    simulated: Option<SimulatedCnnClassifier>,
}

impl Analyzer {
    pub fn new(kb: Arc<KnowledgeBase>, config: ClassifierConfig) -> Self {
        Self {
            rules: RuleBasedClassifier::new(kb.clone(), config.clone()),
            images: ImageMatcher::new(kb.clone(), config.clone()),
            selector: RecommendationSelector::new(kb.clone()),
            simulated: None,
            kb,
            config,
        }
    }

    /// Blend a simulated classifier into image analysis. `seed` makes the
    /// jitter reproducible.
    pub fn with_simulated_cnn(mut self, seed: Option<u64>) -> Self {
        let kb = self.kb.clone();
        let classifier = match seed {
            Some(seed) => SimulatedCnnClassifier::with_seed(kb, self.config.clone(), seed),
            None => SimulatedCnnClassifier::new(kb, self.config.clone()),
        };
        self.simulated = Some(classifier);
        self
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn analyze_symptoms(&self, symptoms: &[String], patient: Option<PatientInfo>) -> SymptomReport {
        let _span = tracing::info_span!("analyze_symptoms", count = symptoms.len()).entered();

        let conditions = sanitize(self.rules.classify(ClassifierInput::Symptoms(symptoms)));
        let recommendation = self.selector.select(&conditions);
        let condition_info = conditions
            .first()
            .filter(|c| !c.is_fallback())
            .map(|c| soften_info(self.kb.disease_info(&c.condition)));
        let emergency = emergency::assess(symptoms);
        let insights = patient.as_ref().map(health_insights);
        let prompt = apply_content_restrictions(with_age_context(
            build_symptom_prompt(symptoms, patient.as_ref()),
            patient.as_ref().and_then(|p| p.age),
        ));

        tracing::info!(
            conditions = conditions.len(),
            urgency = %recommendation.urgency,
            emergency = %emergency.level,
            "Symptom analysis complete"
        );

        SymptomReport {
            symptoms: symptoms.to_vec(),
            overall_confidence: overall_confidence(&conditions),
            conditions,
            condition_info,
            recommendation,
            emergency,
            patient,
            insights,
            prompt,
            generated_at: Local::now().naive_local(),
        }
    }

    /// Analyse one upload. Kinds other than skin and mole get a referral
    /// result instead of skin matching.
    pub fn analyze_image(
        &self,
        upload: &ImageUpload,
        kind: Option<ImageKind>,
    ) -> Result<ImageReport, AnalysisError> {
        let _span = tracing::info_span!("analyze_image", size = upload.size_bytes).entered();

        let mime = validate_upload(upload, &self.config)?;
        let description = self.images.describe(upload);
        let skin = kind.map_or(true, |k| k.is_skin());

        let ranked = if skin {
            let rule_based = self.rules.classify(ClassifierInput::Image(&description));
            match &self.simulated {
                Some(cnn) => {
                    let simulated = cnn.classify(ClassifierInput::Image(&description));
                    combine_predictions(&rule_based, &simulated, self.config.top_n)
                }
                None => rule_based,
            }
        } else {
            tracing::debug!(kind = ?kind, "Non-skin image referred without matching");
            vec![referral_result(&self.config)]
        };
        let conditions = sanitize(ranked);

        let recommendation = self.selector.select(&conditions);
        let abcd = if skin {
            self.images.abcd(&description, &conditions, kind)
        } else {
            None
        };
        let prompt = apply_content_restrictions(build_image_prompt(
            &description.text,
            kind.unwrap_or(ImageKind::Skin),
        ));

        tracing::info!(
            mime = %mime,
            conditions = conditions.len(),
            abcd = abcd.is_some(),
            "Image analysis complete"
        );

        Ok(ImageReport {
            file_name: upload.file_name.clone(),
            description: description.text,
            location: description.location,
            conditions,
            recommendation,
            abcd,
            prompt,
            generated_at: Local::now().naive_local(),
        })
    }

    /// Analyse each upload independently. Results keep input order and
    /// index; one bad file never affects the others.
    pub fn analyze_uploads(
        &self,
        uploads: &[ImageUpload],
        kind: Option<ImageKind>,
    ) -> Vec<(usize, Result<ImageReport, AnalysisError>)> {
        uploads
            .iter()
            .enumerate()
            .map(|(index, upload)| {
                let outcome = self.analyze_image(upload, kind);
                if let Err(e) = &outcome {
                    tracing::warn!(index, error = %e, "Upload rejected");
                }
                (index, outcome)
            })
            .collect()
    }
}

/// Strip prescriptive advice and soften diagnostic wording in every
/// condition before it is shown.
fn sanitize(mut results: Vec<ClassificationResult>) -> Vec<ClassificationResult> {
    for result in &mut results {
        result.description = soften_language(&result.description);
        result.recommendations = filter_recommendations(&result.recommendations);
    }
    results
}

fn soften_info(info: DiseaseInfo) -> DiseaseInfo {
    DiseaseInfo {
        description: soften_language(&info.description),
        treatment: safe_treatment(&info.treatment),
        ..info
    }
}

/// "10 MB", "512 KB" or "900 bytes", whichever unit keeps the value whole.
fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

fn overall_confidence(conditions: &[ClassificationResult]) -> f64 {
    if conditions.is_empty() {
        return 0.0;
    }
    let mean = conditions.iter().map(|c| c.probability).sum::<f64>() / conditions.len() as f64;
    round1(mean.min(MAX_OVERALL_CONFIDENCE))
}
