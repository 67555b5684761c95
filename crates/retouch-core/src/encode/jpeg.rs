//! JPEG encoding for export.
//!
//! JPEG has no alpha channel. Transparent areas are flattened onto black,
//! which is what a browser canvas does for `image/jpeg`.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{check_rgba, normalized, EncodeError};
use crate::params::OutputFormat;

/// Encode RGBA pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - Normalized quality factor (0.0 to 1.0)
///
/// The factor maps to encoder quality `round(quality * 100)`, never below 1.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    check_rgba(pixels, width, height)?;

    let rgb = flatten_onto_black(pixels);
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, encoder_quality(quality))
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Jpeg,
            message: e.to_string(),
        })?;

    Ok(out)
}

fn encoder_quality(quality: f32) -> u8 {
    (normalized(quality) * 100.0).round().clamp(1.0, 100.0) as u8
}

fn flatten_onto_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &channel in &px[..3] {
            rgb.push(((channel as u32 * alpha + 127) / 255) as u8);
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    128,
                    255,
                ]);
            }
        }
        pixels
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_jpeg(&vec![128u8; 100 * 100 * 4], 100, 100, 0.9).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_quality_affects_size() {
        let pixels = gradient(64, 64);
        let low = encode_jpeg(&pixels, 64, 64, 0.1).unwrap();
        let high = encode_jpeg(&pixels, 64, 64, 1.0).unwrap();
        assert!(high.len() > low.len(), "low={} high={}", low.len(), high.len());
    }

    #[test]
    fn test_encoder_quality_mapping() {
        assert_eq!(encoder_quality(0.9), 90);
        assert_eq!(encoder_quality(0.1), 10);
        assert_eq!(encoder_quality(0.0), 1);
        assert_eq!(encoder_quality(2.0), 100);
    }

    #[test]
    fn test_flatten_onto_black() {
        let rgb = flatten_onto_black(&[200, 100, 50, 255, 200, 100, 50, 0, 255, 255, 255, 128]);
        assert_eq!(rgb, vec![200, 100, 50, 0, 0, 0, 128, 128, 128]);
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            encode_jpeg(&[0; 10], 2, 2, 0.9),
            Err(EncodeError::InvalidPixelData { .. })
        ));
        assert!(matches!(
            encode_jpeg(&[], 0, 10, 0.9),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_one_pixel() {
        let jpeg = encode_jpeg(&[255, 0, 0, 255], 1, 1, 0.9).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}
