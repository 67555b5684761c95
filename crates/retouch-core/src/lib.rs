//! Retouch Core - single-image editing library
//!
//! This crate provides the core of a simple image editor: upload validation,
//! decoding, an aspect-locked parameter store, a single-pass affine render
//! (rotation, scale, brightness onto a fixed canvas) and export to JPEG, PNG
//! or WebP.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod export;
pub mod params;
pub mod preview;
pub mod render;
pub mod session;
pub mod validate;

pub use config::{Bounds, ConfigError, EditLimits, EditorConfig};
pub use decode::{DecodeError, DecodedImage, SourceImage};
pub use encode::EncodeError;
pub use error::EditorError;
pub use export::{export, suggested_file_name, ExportArtifact};
pub use params::{
    ChangeSet, EditCommand, EditField, EditState, FormatError, OutputFormat, ParameterStore,
};
pub use preview::{PreviewGuard, PreviewResource};
pub use render::{render, InterpolationFilter, RenderTarget};
pub use session::EditSession;
pub use validate::{FileInfo, FileKind, FileValidator, ValidationError};
