use crate::types::DocumentType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecgateError {
    // -- input ------------------------------------------------------------
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("cannot read input {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input is empty: {0}")]
    EmptyInput(String),

    // -- configuration ----------------------------------------------------
    #[error("no catalog entry for document type '{0}'")]
    NoCatalogEntry(DocumentType),

    #[error("catalog check list for '{0}' is empty")]
    EmptyCheckList(DocumentType),

    #[error("invalid pattern '{pattern}' in check '{check}': {reason}")]
    InvalidPattern {
        check: String,
        pattern: String,
        reason: String,
    },

    #[error("duplicate {kind} id '{id}' in catalog")]
    DuplicateId { kind: &'static str, id: String },

    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),

    #[error("unknown severity: {0}")]
    UnknownSeverity(String),

    #[error("catalog file not found: {}", .0.display())]
    CatalogNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SpecgateError {
    /// Missing, unreadable or empty input. Reported before any evaluation runs.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SpecgateError::InputNotFound(_)
                | SpecgateError::InputUnreadable { .. }
                | SpecgateError::EmptyInput(_)
        )
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SpecgateError::NoCatalogEntry(_)
                | SpecgateError::EmptyCheckList(_)
                | SpecgateError::InvalidPattern { .. }
                | SpecgateError::DuplicateId { .. }
                | SpecgateError::UnknownDocumentType(_)
                | SpecgateError::UnknownSeverity(_)
                | SpecgateError::CatalogNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SpecgateError>;
