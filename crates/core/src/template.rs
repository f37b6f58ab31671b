use thiserror::Error;

/// Declared media type of Word-processing documents (`.docx`).
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("'{name}' is not a .docx file")]
    NotDocx { name: String },
}

/// The uploaded exam template: an opaque binary blob keyed by name,
/// size, and type. The contents are never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl TemplateFile {
    /// Accepts a file whose declared media type or filename extension
    /// indicates a Word-processing document.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::NotDocx` for anything else; rejection
    /// causes no state change anywhere.
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, TemplateError> {
        let name = name.into();
        let media_type = media_type.into();
        if media_type != DOCX_MEDIA_TYPE && !name.to_ascii_lowercase().ends_with(".docx") {
            return Err(TemplateError::NotDocx { name });
        }
        Ok(Self {
            name,
            media_type,
            bytes,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Size in kilobytes, as shown next to the uploaded file.
    #[must_use]
    pub fn size_kb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }
}
