//! Decoded pixel buffers and decode errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes do not start with any signature the decoder knows.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// Recognized, but the data is truncated or malformed.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Straight-alpha RGBA8, row-major, `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0 || self.pixels.is_empty()
    }

    /// RGBA at `(x, y)`; the caller keeps the coordinates in bounds.
    #[inline]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let start = (y * self.width as usize + x) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[start..start + 4]);
        px
    }
}
