//! Editor-level error type.
//!
//! Each module reports its own error enum; this one collects them for callers
//! that drive a whole edit session. None of these is fatal: the caller goes
//! back to a stable state (the upload screen, or the last good render).

use thiserror::Error;

use crate::config::ConfigError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::validate::{FileKind, ValidationError};

#[derive(Debug, Error)]
pub enum EditorError {
    /// The upload's type is not on the accept list.
    #[error("Invalid file type \"{0}\". Please upload a supported file format.")]
    InvalidFileType(String),

    /// The upload exceeds the configured size ceiling.
    #[error("File size exceeds the limit of {max_mb}MB.")]
    FileTooLarge { size_bytes: u64, max_mb: f64 },

    /// The file is valid but has no image editor (e.g. a PDF).
    #[error("{} files cannot be opened in the image editor", .0.as_str())]
    NotEditable(FileKind),

    /// The source could not be decoded; no session was created.
    #[error("Failed to load image: {0}")]
    DecodeFailure(#[from] DecodeError),

    /// Export failed; the edit state is untouched and export can be retried.
    #[error("Failed to generate file: {0}")]
    EncodingFailure(#[from] EncodeError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl From<ValidationError> for EditorError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::InvalidFileType { mime_type } => EditorError::InvalidFileType(mime_type),
            ValidationError::FileTooLarge { size_bytes, max_mb } => {
                EditorError::FileTooLarge { size_bytes, max_mb }
            }
        }
    }
}

impl EditorError {
    /// True for errors raised before any decoding took place.
    pub fn is_rejected_upload(&self) -> bool {
        matches!(
            self,
            EditorError::InvalidFileType(_)
                | EditorError::FileTooLarge { .. }
                | EditorError::NotEditable(_)
        )
    }
}
