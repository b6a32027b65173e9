use crate::error::{Result, SpecgateError};
use crate::types::DocumentType;
use std::io::Read;
use std::path::Path;

/// A single document read for one validation or classification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub doc_type: DocumentType,
    pub text: String,
    pub line_count: usize,
}

impl Document {
    /// Wrap already-loaded text. Empty text is allowed here; it simply fails
    /// the content-size checks during validation.
    pub fn new(doc_type: DocumentType, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_count = text.lines().count();
        Self {
            doc_type,
            text,
            line_count,
        }
    }

    /// Load from inline text. Whitespace-only input is rejected.
    pub fn from_text(doc_type: DocumentType, text: impl Into<String>, origin: &str) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SpecgateError::EmptyInput(origin.to_string()));
        }
        Ok(Self::new(doc_type, text))
    }

    pub fn from_file(doc_type: DocumentType, path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SpecgateError::InputNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| {
            SpecgateError::InputUnreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded document");
        Self::from_text(doc_type, text, &path.display().to_string())
    }

    pub fn from_reader<R: Read>(doc_type: DocumentType, mut reader: R, origin: &str) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| SpecgateError::InputUnreadable {
                path: origin.into(),
                source,
            })?;
        Self::from_text(doc_type, text, origin)
    }

    pub fn byte_len(&self) -> usize {
        self.text.len()
    }
}
