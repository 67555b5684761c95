//! Image decoding for Retouch.
//!
//! This module provides functionality for:
//! - Decoding common raster formats into RGBA pixel buffers
//! - Applying EXIF orientation so dimensions match what the browser shows
//! - Wrapping the result as an immutable [`SourceImage`]
//!
//! Decoding happens once per file. Every later render reads the same
//! `SourceImage`.

mod raster;
mod source;
mod types;

pub use raster::{decode_image, get_orientation, Orientation};
#[cfg(test)]
pub(crate) use raster::testing;
pub use source::SourceImage;
pub use types::{DecodeError, DecodedImage};
