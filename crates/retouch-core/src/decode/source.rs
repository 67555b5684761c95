//! The immutable source image an edit session works from.

use super::{decode_image, DecodeError, DecodedImage};

/// A decoded source file together with where it came from.
///
/// Once built, a `SourceImage` never changes; editing only ever reads it.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DecodedImage,
    file_name: String,
    mime_type: String,
}

impl SourceImage {
    /// Decode `bytes` into a source image.
    ///
    /// No partial source is produced: a decode failure returns the error and
    /// nothing else.
    pub fn decode(
        bytes: &[u8],
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Result<Self, DecodeError> {
        let image = decode_image(bytes)?;
        Ok(Self::from_decoded(image, file_name, mime_type))
    }

    /// Wrap an already decoded image.
    pub fn from_decoded(
        image: DecodedImage,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            image,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn natural_width(&self) -> u32 {
        self.image.width
    }

    pub fn natural_height(&self) -> u32 {
        self.image.height
    }

    /// Width divided by height of the natural image.
    pub fn aspect_ratio(&self) -> f64 {
        self.image.width as f64 / self.image.height as f64
    }

    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The MIME type the file was declared with, e.g. `image/png`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}
