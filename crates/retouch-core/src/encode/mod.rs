//! Image encoding pipeline for Retouch.
//!
//! This module provides functionality for:
//! - Encoding a render target as JPEG with a quality factor
//! - Encoding a render target as lossless PNG
//! - Encoding a render target as WebP, trading color precision for size
//!
//! All encoders take straight-alpha RGBA input. Quality is passed as a
//! normalized factor in `[0, 1]`; PNG ignores it.

mod jpeg;
mod png;
mod webp;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use webp::encode_webp;

use thiserror::Error;

use crate::params::OutputFormat;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder refused the image
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: OutputFormat,
        message: String,
    },
}

/// Encode RGBA pixels in `format`.
///
/// `quality` is the normalized factor (`output_quality / 100`); values
/// outside `[0, 1]` are clamped.
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(pixels, width, height, quality),
        OutputFormat::Png => encode_png(pixels, width, height),
        OutputFormat::Webp => encode_webp(pixels, width, height, quality),
    }
}

/// Validate dimensions and buffer length for an RGBA image.
fn check_rgba(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}

fn normalized(quality: f32) -> f32 {
    if quality.is_nan() {
        1.0
    } else {
        quality.clamp(0.0, 1.0)
    }
}
