use std::fs;
use std::path::Path;

use super::{KnowledgeBase, KnowledgeError};

/// Load and validate a knowledge base from a JSON file.
pub fn load(path: &Path) -> Result<KnowledgeBase, KnowledgeError> {
    let raw = fs::read_to_string(path)?;
    let kb: KnowledgeBase = serde_json::from_str(&raw)?;
    kb.validate()?;
    tracing::info!(
        conditions = kb.conditions.len(),
        skin_conditions = kb.skin_conditions.len(),
        "Knowledge base loaded from file"
    );
    Ok(kb)
}

/// Load the override at `path` if it exists, else the bundled tables.
/// A present but broken override is an error, not a silent fallback.
pub fn load_or_builtin(path: &Path) -> Result<KnowledgeBase, KnowledgeError> {
    if path.exists() {
        load(path)
    } else {
        tracing::debug!("No knowledge base override, using bundled tables");
        Ok(KnowledgeBase::builtin())
    }
}

/// Write a knowledge base as pretty JSON, creating parent directories.
pub fn save(kb: &KnowledgeBase, path: &Path) -> Result<(), KnowledgeError> {
    kb.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(kb)?;
    fs::write(path, json)?;
    Ok(())
}
