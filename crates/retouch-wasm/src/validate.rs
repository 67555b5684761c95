//! Upload validation bindings.
//!
//! Lets the page check a `File` before reading its bytes.

use retouch_core::{EditorConfig, EditorError, FileInfo, FileKind};
use wasm_bindgen::prelude::*;

use crate::config::config_from_js;

/// Check a file against the configuration.
///
/// Returns `"image"` or `"pdf"` so the page can pick a view, or throws with
/// a user-facing message.
///
/// ```typescript
/// const kind = validate_file(file.name, file.type, file.size, { maxFileSizeMb: 5 });
/// ```
#[wasm_bindgen]
pub fn validate_file(
    name: &str,
    mime_type: &str,
    size_bytes: f64,
    config: JsValue,
) -> Result<String, JsValue> {
    let config = config_from_js(config)?;
    classify_upload(name, mime_type, size_bytes, &config)
        .map(|kind| kind.as_str().to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn classify_upload(
    name: &str,
    mime_type: &str,
    size_bytes: f64,
    config: &EditorConfig,
) -> Result<FileKind, EditorError> {
    config.validate()?;
    let file = FileInfo::new(name, mime_type, byte_count(size_bytes));
    Ok(config.validator().accept(&file)?)
}

/// JS sizes arrive as doubles. Anything unusable counts as empty.
pub(crate) fn byte_count(size: f64) -> u64 {
    if size.is_finite() && size > 0.0 {
        size as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: f64 = 1024.0 * 1024.0;

    #[test]
    fn test_classify_image_and_pdf() {
        let config = EditorConfig::default();
        assert_eq!(
            classify_upload("a.png", "image/png", 2.0 * MB, &config).unwrap(),
            FileKind::Image
        );
        assert_eq!(
            classify_upload("a.pdf", "application/pdf", 2.0 * MB, &config).unwrap(),
            FileKind::Pdf
        );
    }

    #[test]
    fn test_classify_too_large() {
        let result = classify_upload("a.png", "image/png", 12.0 * MB, &EditorConfig::default());
        assert!(matches!(result, Err(EditorError::FileTooLarge { .. })));
    }

    #[test]
    fn test_classify_wrong_type() {
        let result = classify_upload("a.txt", "text/plain", 10.0, &EditorConfig::default());
        assert!(matches!(result, Err(EditorError::InvalidFileType(_))));
    }

    #[test]
    fn test_byte_count() {
        assert_eq!(byte_count(1536.0), 1536);
        assert_eq!(byte_count(-4.0), 0);
        assert_eq!(byte_count(f64::NAN), 0);
    }
}
