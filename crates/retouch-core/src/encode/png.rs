//! Lossless PNG encoding. Quality has no say here.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{check_rgba, EncodeError};
use crate::params::OutputFormat;

/// Encode RGBA pixel data to PNG bytes, keeping the alpha channel.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    check_rgba(pixels, width, height)?;

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Png,
            message: e.to_string(),
        })?;

    Ok(out)
}
