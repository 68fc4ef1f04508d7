pub mod analysis;
pub mod chat; // Chat responder + session log
pub mod classifier;
pub mod config;
pub mod emergency;
pub mod insights;
pub mod knowledge;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod prompt;
pub mod recommend;
pub mod safety;
pub mod session; // App context, sign-in forms

pub use analysis::{AnalysisError, Analyzer, UploadError};
pub use classifier::{Classifier, ClassifierInput, RuleBasedClassifier, SimulatedCnnClassifier};
pub use knowledge::{KnowledgeBase, KnowledgeError};
pub use session::AppContext;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over the default
/// filter. Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}
