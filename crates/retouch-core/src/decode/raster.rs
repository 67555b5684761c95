//! Raster decoding (JPEG, PNG, WebP, GIF, BMP) with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The container format is sniffed from the bytes; the declared MIME type is
/// not trusted. Browsers honour EXIF orientation when decoding an `<img>`, so
/// the decoded dimensions here are the ones a user sees.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized format.
/// Returns `DecodeError::CorruptedFile` if the image data is corrupted.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = get_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = orientation.apply(img);
    let decoded = DecodedImage::from_rgba_image(oriented.into_rgba8());

    if decoded.is_empty() {
        return Err(DecodeError::CorruptedFile("image has no pixels".to_string()));
    }

    log::debug!(
        "decoded {}x{} image (orientation {:?})",
        decoded.width,
        decoded.height,
        orientation
    );
    Ok(decoded)
}

/// EXIF orientation tag, limited to the values the decoder acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Upright,
    Mirrored,
    UpsideDown,
    MirroredUpsideDown,
    /// Mirrored, then a quarter turn counter-clockwise.
    MirroredLeft,
    QuarterRight,
    /// Mirrored, then a quarter turn clockwise.
    MirroredRight,
    QuarterLeft,
}

impl Orientation {
    /// Map an EXIF orientation value (1 to 8).
    pub fn from_exif(value: u32) -> Option<Self> {
        let orientation = match value {
            1 => Self::Upright,
            2 => Self::Mirrored,
            3 => Self::UpsideDown,
            4 => Self::MirroredUpsideDown,
            5 => Self::MirroredLeft,
            6 => Self::QuarterRight,
            7 => Self::MirroredRight,
            8 => Self::QuarterLeft,
            _ => return None,
        };
        Some(orientation)
    }

    /// Turn stored pixels into the upright view.
    fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Self::Upright => img,
            Self::Mirrored => img.fliph(),
            Self::UpsideDown => img.rotate180(),
            Self::MirroredUpsideDown => img.flipv(),
            Self::MirroredLeft => img.rotate90().fliph(),
            Self::QuarterRight => img.rotate90(),
            Self::MirroredRight => img.rotate270().fliph(),
            Self::QuarterLeft => img.rotate270(),
        }
    }
}

/// Orientation recorded in the file's EXIF block, or `Upright` if there is
/// none or it cannot be read.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .and_then(Orientation::from_exif)
        .unwrap_or_default()
}
