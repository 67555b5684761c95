//! Upload validation and file classification.
//!
//! Validation runs before any decoding. A file that fails here never reaches
//! the render or export engines.

use thiserror::Error;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Why an upload was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid file type \"{mime_type}\". Please upload a supported file format.")]
    InvalidFileType { mime_type: String },

    #[error("File size exceeds the limit of {max_mb}MB.")]
    FileTooLarge { size_bytes: u64, max_mb: f64 },
}

/// The metadata of an uploaded file needed to validate it.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    /// Lowercased text after the last `.` in the name, if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// What kind of editor a validated file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
}

impl FileKind {
    /// Route a file to an editor by its MIME type, falling back to the
    /// `.pdf` extension. Returns `None` for anything else.
    pub fn classify(file: &FileInfo) -> Option<Self> {
        if file.mime_type.starts_with("image/") {
            Some(FileKind::Image)
        } else if file.mime_type == PDF_MIME || file.extension().as_deref() == Some("pdf") {
            Some(FileKind::Pdf)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Pdf => "pdf",
        }
    }
}

const PDF_MIME: &str = "application/pdf";

/// One entry of an accept list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimePattern {
    /// `type/*`; stores the `type/` prefix.
    Wildcard(String),
    /// `application/pdf`, which also accepts a `.pdf` extension.
    Pdf,
    /// Any other MIME type, matched exactly.
    Exact(String),
}

impl MimePattern {
    pub fn parse(pattern: &str) -> Self {
        let pattern = pattern.trim();
        if pattern == PDF_MIME {
            MimePattern::Pdf
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            MimePattern::Wildcard(prefix.to_string())
        } else {
            MimePattern::Exact(pattern.to_string())
        }
    }

    pub fn matches(&self, file: &FileInfo) -> bool {
        match self {
            MimePattern::Wildcard(prefix) => file.mime_type.starts_with(prefix.as_str()),
            MimePattern::Pdf => {
                file.mime_type == PDF_MIME || file.extension().as_deref() == Some("pdf")
            }
            MimePattern::Exact(mime) => file.mime_type == *mime,
        }
    }
}

/// Checks uploads against an accept list and a size ceiling.
#[derive(Debug, Clone)]
pub struct FileValidator {
    accepted: Vec<MimePattern>,
    max_size_mb: f64,
}

impl FileValidator {
    pub fn new<S: AsRef<str>>(accepted: &[S], max_size_mb: f64) -> Self {
        Self {
            accepted: accepted.iter().map(|p| MimePattern::parse(p.as_ref())).collect(),
            max_size_mb,
        }
    }

    pub fn max_size_mb(&self) -> f64 {
        self.max_size_mb
    }

    /// Validate type first, then size.
    pub fn validate(&self, file: &FileInfo) -> Result<(), ValidationError> {
        if !self.accepted.iter().any(|pattern| pattern.matches(file)) {
            log::warn!("rejected {}: type {:?} not accepted", file.name, file.mime_type);
            return Err(ValidationError::InvalidFileType {
                mime_type: file.mime_type.clone(),
            });
        }

        let size_mb = file.size_bytes as f64 / BYTES_PER_MB;
        if size_mb > self.max_size_mb {
            log::warn!(
                "rejected {}: {:.2}MB exceeds {}MB",
                file.name,
                size_mb,
                self.max_size_mb
            );
            return Err(ValidationError::FileTooLarge {
                size_bytes: file.size_bytes,
                max_mb: self.max_size_mb,
            });
        }

        Ok(())
    }

    /// Validate and route in one step.
    ///
    /// A file can pass an exact-match pattern (say `text/plain`) and still
    /// have no editor; that is reported as `InvalidFileType`.
    pub fn accept(&self, file: &FileInfo) -> Result<FileKind, ValidationError> {
        self.validate(file)?;
        FileKind::classify(file).ok_or_else(|| ValidationError::InvalidFileType {
            mime_type: file.mime_type.clone(),
        })
    }
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new(
            &crate::config::DEFAULT_ACCEPTED_TYPES,
            crate::config::DEFAULT_MAX_FILE_SIZE_MB,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn test_accepts_image_under_limit() {
        let validator = FileValidator::default();
        let file = FileInfo::new("photo.jpg", "image/jpeg", 2 * MB);
        assert_eq!(validator.accept(&file), Ok(FileKind::Image));
    }

    #[test]
    fn test_file_too_large() {
        let validator = FileValidator::default();
        let file = FileInfo::new("huge.png", "image/png", 12 * MB);
        assert!(matches!(
            validator.validate(&file),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_exactly_at_limit_is_accepted() {
        let validator = FileValidator::default();
        let file = FileInfo::new("edge.png", "image/png", 10 * MB);
        assert!(validator.validate(&file).is_ok());
    }

    #[test]
    fn test_pdf_rejected_by_image_only_list() {
        let validator = FileValidator::new(&["image/*"], 10.0);
        let file = FileInfo::new("doc.pdf", "application/pdf", 1024);
        assert!(matches!(
            validator.validate(&file),
            Err(ValidationError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn test_pdf_extension_fallback() {
        let validator = FileValidator::new(&["application/pdf"], 10.0);
        let file = FileInfo::new("Report.PDF", "", 1024);
        assert_eq!(validator.accept(&file), Ok(FileKind::Pdf));
    }

    #[test]
    fn test_exact_pattern() {
        let validator = FileValidator::new(&["image/png"], 10.0);
        assert!(validator
            .validate(&FileInfo::new("a.png", "image/png", 1))
            .is_ok());
        assert!(validator
            .validate(&FileInfo::new("a.jpg", "image/jpeg", 1))
            .is_err());
    }

    #[test]
    fn test_type_checked_before_size() {
        let validator = FileValidator::new(&["image/*"], 1.0);
        let file = FileInfo::new("big.txt", "text/plain", 50 * MB);
        assert!(matches!(
            validator.validate(&file),
            Err(ValidationError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn test_accepted_but_not_editable() {
        let validator = FileValidator::new(&["text/plain"], 10.0);
        let file = FileInfo::new("notes.txt", "text/plain", 10);
        assert!(validator.validate(&file).is_ok());
        assert!(matches!(
            validator.accept(&file),
            Err(ValidationError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            FileKind::classify(&FileInfo::new("x.webp", "image/webp", 1)),
            Some(FileKind::Image)
        );
        assert_eq!(
            FileKind::classify(&FileInfo::new("x.pdf", "application/octet-stream", 1)),
            Some(FileKind::Pdf)
        );
        assert_eq!(
            FileKind::classify(&FileInfo::new("x.zip", "application/zip", 1)),
            None
        );
    }

    #[test]
    fn test_extension() {
        assert_eq!(FileInfo::new("a.b.PNG", "", 0).extension().as_deref(), Some("png"));
        assert_eq!(FileInfo::new("noext", "", 0).extension(), None);
        assert_eq!(FileInfo::new("trailing.", "", 0).extension(), None);
    }

    #[test]
    fn test_mime_pattern_parse() {
        assert_eq!(
            MimePattern::parse("image/*"),
            MimePattern::Wildcard("image/".to_string())
        );
        assert_eq!(MimePattern::parse("application/pdf"), MimePattern::Pdf);
        assert_eq!(
            MimePattern::parse(" image/gif "),
            MimePattern::Exact("image/gif".to_string())
        );
    }
}
