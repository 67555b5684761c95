//! Editor configuration.
//!
//! All options have defaults, so an empty JSON object (or `undefined` from
//! JavaScript) yields a working configuration. Keys are camelCase on the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validate::FileValidator;

/// Default accepted MIME patterns.
pub const DEFAULT_ACCEPTED_TYPES: [&str; 2] = ["image/*", "application/pdf"];

/// Default upload ceiling in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: f64 = 10.0;

/// Default export quality (percent).
pub const DEFAULT_QUALITY: f32 = 90.0;

/// Default ceiling on `target_width * target_height` (50 megapixels).
pub const DEFAULT_MAX_TARGET_PIXELS: u64 = 50_000_000;

/// Errors raised when a configuration is internally inconsistent.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {name} bounds: min ({min}) must not exceed max ({max})")]
    InvalidBounds { name: &'static str, min: f32, max: f32 },

    #[error("Invalid maximum file size: {0} MB")]
    InvalidMaxFileSize(f64),

    #[error("Invalid maximum target area: {0} pixels")]
    InvalidMaxTargetPixels(u64),
}

/// Inclusive numeric range used to clamp a percentage parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the range. Non-finite input yields `None`.
    pub fn clamp(&self, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        Some(value.clamp(self.min, self.max))
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(ConfigError::InvalidBounds {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Limits applied by the parameter store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditLimits {
    /// Export quality range, percent.
    pub quality_bounds: Bounds,
    /// Uniform scale range, percent.
    pub scale_bounds: Bounds,
    /// Brightness range, percent.
    pub brightness_bounds: Bounds,
    /// Quality a fresh or reset session starts with.
    pub default_quality: f32,
    /// Largest canvas a dimension edit may produce, in pixels.
    pub max_target_pixels: u64,
}

impl Default for EditLimits {
    fn default() -> Self {
        Self {
            quality_bounds: Bounds::new(10.0, 100.0),
            scale_bounds: Bounds::new(10.0, 200.0),
            brightness_bounds: Bounds::new(0.0, 200.0),
            default_quality: DEFAULT_QUALITY,
            max_target_pixels: DEFAULT_MAX_TARGET_PIXELS,
        }
    }
}

impl EditLimits {
    /// The default quality, pulled into the quality bounds.
    pub fn initial_quality(&self) -> f32 {
        self.quality_bounds
            .clamp(self.default_quality)
            .unwrap_or(self.quality_bounds.max)
    }

    /// Whether a `width x height` canvas stays within `max_target_pixels`.
    pub fn fits_target(&self, width: u32, height: u32) -> bool {
        u64::from(width)
            .checked_mul(u64::from(height))
            .is_some_and(|area| area <= self.max_target_pixels)
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Accepted MIME patterns: exact types, `type/*` wildcards, or
    /// `application/pdf` (which also matches a `.pdf` extension).
    pub accepted_types: Vec<String>,
    /// Maximum upload size in megabytes (1 MB = 1024 * 1024 bytes).
    pub max_file_size_mb: f64,
    /// Parameter bounds and defaults.
    #[serde(flatten)]
    pub limits: EditLimits,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            accepted_types: DEFAULT_ACCEPTED_TYPES.iter().map(|s| s.to_string()).collect(),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            limits: EditLimits::default(),
        }
    }
}

impl EditorConfig {
    /// Reject configurations that could never produce a valid edit state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.quality_bounds.check("quality")?;
        self.limits.scale_bounds.check("scale")?;
        self.limits.brightness_bounds.check("brightness")?;
        if !self.max_file_size_mb.is_finite() || self.max_file_size_mb < 0.0 {
            return Err(ConfigError::InvalidMaxFileSize(self.max_file_size_mb));
        }
        if self.limits.max_target_pixels == 0 {
            return Err(ConfigError::InvalidMaxTargetPixels(0));
        }
        Ok(())
    }

    /// Build the upload validator described by this configuration.
    pub fn validator(&self) -> FileValidator {
        FileValidator::new(&self.accepted_types, self.max_file_size_mb)
    }
}
