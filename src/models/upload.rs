use serde::{Deserialize, Serialize};

/// An uploaded file as seen by the core: metadata plus user free text.
/// Pixel data is never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    /// Declared MIME type; guessed from the file name when absent.
    pub mime_type: Option<String>,
    pub size_bytes: u64,
    #[serde(default)]
    pub description: String,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            size_bytes,
            description: String::new(),
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declared MIME type, or the first guess from the file extension.
    pub fn effective_mime(&self) -> Option<String> {
        match &self.mime_type {
            Some(m) if !m.trim().is_empty() => Some(m.trim().to_lowercase()),
            _ => mime_guess::from_path(&self.file_name)
                .first()
                .map(|m| m.essence_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guessed_from_extension() {
        let upload = ImageUpload::new("left_arm_rash.JPG", 1024);
        assert_eq!(upload.effective_mime().as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn declared_mime_wins() {
        let upload = ImageUpload::new("photo.bin", 1024).with_mime("Image/PNG");
        assert_eq!(upload.effective_mime().as_deref(), Some("image/png"));
    }

    #[test]
    fn unknown_extension_has_no_mime() {
        let upload = ImageUpload::new("scan", 10);
        assert_eq!(upload.effective_mime(), None);
    }
}
