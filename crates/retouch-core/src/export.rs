//! Export: encode the current render target into a named artifact.
//!
//! Triggering the download is left to the caller; this module stops at bytes
//! plus a suggested file name.

use crate::encode::{self, EncodeError};
use crate::params::{EditState, OutputFormat};
use crate::render::RenderTarget;

/// Stem used when the source name has nothing before its extension.
pub const FALLBACK_STEM: &str = "edited-image";

/// An encoded export, ready to hand to a download mechanism.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub format: OutputFormat,
}

impl ExportArtifact {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode `target` with the format and quality from `state`.
pub fn export(
    target: &RenderTarget,
    state: &EditState,
    source_file_name: &str,
) -> Result<ExportArtifact, EncodeError> {
    let format = state.output_format;
    let bytes = encode::encode(
        &target.pixels,
        target.width,
        target.height,
        format,
        state.quality_factor(),
    )
    .inspect_err(|e| log::warn!("export of {source_file_name} failed: {e}"))?;

    let file_name = suggested_file_name(source_file_name, format);
    log::debug!("exported {} ({} bytes)", file_name, bytes.len());

    Ok(ExportArtifact {
        bytes,
        file_name,
        format,
    })
}

/// `<stem>-edited.<ext>`, where the stem is `source_name` without its last
/// extension.
pub fn suggested_file_name(source_name: &str, format: OutputFormat) -> String {
    let stem = match source_name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => source_name,
    };
    let stem = if stem.trim().is_empty() { FALLBACK_STEM } else { stem };
    format!("{stem}-edited.{}", format.extension())
}
