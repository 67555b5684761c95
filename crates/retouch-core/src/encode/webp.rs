//! WebP encoding.
//!
//! The `image` crate only writes lossless WebP. To give the quality factor a
//! real effect without native libwebp, RGB channels are first quantized to a
//! palette whose size grows with quality; fewer distinct values compress
//! better. Quality 1.0 skips quantization and stays lossless. Alpha is never
//! quantized.

use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{check_rgba, normalized, EncodeError};
use crate::params::OutputFormat;

/// Encode RGBA pixel data to WebP bytes.
///
/// `quality` is the normalized factor (0.0 to 1.0).
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    check_rgba(pixels, width, height)?;

    let levels = levels_for_quality(normalized(quality));
    let mut buffer = pixels.to_vec();
    quantize_rgb(&mut buffer, levels);

    let mut out = Vec::new();
    WebPEncoder::new_lossless(&mut out)
        .write_image(&buffer, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Webp,
            message: e.to_string(),
        })?;

    Ok(out)
}

/// Number of values per channel kept at `quality`. Biased so the top of the
/// slider stays fine-grained and the bottom gets coarse quickly.
fn levels_for_quality(quality: f32) -> u16 {
    if quality >= 1.0 {
        return 256;
    }
    let levels = 2.0 + quality * quality * 254.0;
    levels.round().clamp(2.0, 256.0) as u16
}

fn quantize_rgb(rgba: &mut [u8], levels: u16) {
    if levels >= 256 {
        return;
    }
    let step = 255.0 / (levels as f32 - 1.0);
    for px in rgba.chunks_exact_mut(4) {
        for channel in px.iter_mut().take(3) {
            let bucket = (*channel as f32 / step).round();
            *channel = (bucket * step).round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy(width: u32, height: u32) -> Vec<u8> {
        (0..width * height)
            .flat_map(|i| {
                let v = (i.wrapping_mul(2654435761) >> 13) as u8;
                [v, v.wrapping_mul(3), v.wrapping_add(91), 255]
            })
            .collect()
    }

    #[test]
    fn test_full_quality_is_lossless() {
        let pixels = noisy(9, 7);
        let webp = encode_webp(&pixels, 9, 7, 1.0).unwrap();
        let decoded = image::load_from_memory(&webp).unwrap().into_rgba8();
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let pixels = noisy(48, 48);
        let high = encode_webp(&pixels, 48, 48, 1.0).unwrap();
        let low = encode_webp(&pixels, 48, 48, 0.1).unwrap();
        assert!(low.len() < high.len(), "low={} high={}", low.len(), high.len());
    }

    #[test]
    fn test_alpha_survives_quantization() {
        let pixels = vec![123, 45, 67, 10, 200, 201, 202, 250];
        let webp = encode_webp(&pixels, 2, 1, 0.2).unwrap();
        let decoded = image::load_from_memory(&webp).unwrap().into_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0[3], 10);
        assert_eq!(decoded.get_pixel(1, 0).0[3], 250);
    }

    #[test]
    fn test_levels_for_quality() {
        assert_eq!(levels_for_quality(1.0), 256);
        assert_eq!(levels_for_quality(0.0), 2);
        assert_eq!(levels_for_quality(0.5), 66);
        assert!(levels_for_quality(0.9) > levels_for_quality(0.5));
    }

    #[test]
    fn test_quantize_two_levels() {
        let mut px = vec![10, 127, 200, 33];
        quantize_rgb(&mut px, 2);
        assert_eq!(px, vec![0, 0, 255, 33]);
    }
}
