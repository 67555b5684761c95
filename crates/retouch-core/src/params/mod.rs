//! Parameter store: the only way to mutate an [`EditState`].
//!
//! Every setter validates and clamps its input before committing, so the
//! store can never hold an invalid state:
//!
//! - width and height stay positive and locked to the source aspect ratio
//!   whenever one of them is edited directly
//! - the canvas area never exceeds `EditLimits::max_target_pixels`
//! - rotation is kept in `[0, 360)`
//! - scale, brightness and quality are clamped into their bounds
//!
//! Rejected input is a silent no-op, reported as an empty [`ChangeSet`].

mod format;
mod state;

pub use format::{FormatError, OutputFormat};
pub use state::{ChangeSet, EditField, EditState, RENDER_DEPENDENCIES};

use crate::config::EditLimits;
use crate::decode::SourceImage;

/// A single user edit, as delivered by the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditCommand {
    SetWidth(i64),
    SetHeight(i64),
    Rotate(i32),
    SetScale(f32),
    SetBrightness(f32),
    SetQuality(f32),
    SetOutputFormat(OutputFormat),
    Reset,
}

/// Holds the current edit state and the source-derived defaults it resets to.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    state: EditState,
    defaults: EditState,
    aspect_ratio: f64,
    limits: EditLimits,
}

impl ParameterStore {
    /// Build a store whose defaults derive from `source`.
    pub fn for_source(source: &SourceImage, limits: EditLimits) -> Self {
        Self::new(
            source.natural_width(),
            source.natural_height(),
            OutputFormat::for_source_mime(source.mime_type()),
            limits,
        )
    }

    /// Build a store for an image of the given natural size.
    ///
    /// Zero dimensions are raised to 1 so the aspect ratio stays finite;
    /// decoding never produces an empty image, so this only guards misuse.
    pub fn new(
        natural_width: u32,
        natural_height: u32,
        output_format: OutputFormat,
        limits: EditLimits,
    ) -> Self {
        let width = natural_width.max(1);
        let height = natural_height.max(1);
        let defaults = EditState {
            target_width: width,
            target_height: height,
            rotation_deg: 0,
            scale_percent: 100.0,
            brightness_percent: 100.0,
            output_format,
            output_quality: limits.initial_quality(),
        };
        Self {
            state: defaults.clone(),
            defaults,
            aspect_ratio: width as f64 / height as f64,
            limits,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn defaults(&self) -> &EditState {
        &self.defaults
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn limits(&self) -> &EditLimits {
        &self.limits
    }

    /// Apply one command and report which fields changed.
    pub fn apply(&mut self, command: EditCommand) -> ChangeSet {
        match command {
            EditCommand::SetWidth(px) => self.set_width(px),
            EditCommand::SetHeight(px) => self.set_height(px),
            EditCommand::Rotate(delta) => self.rotate(delta),
            EditCommand::SetScale(percent) => self.set_scale(percent),
            EditCommand::SetBrightness(percent) => self.set_brightness(percent),
            EditCommand::SetQuality(percent) => self.set_quality(percent),
            EditCommand::SetOutputFormat(format) => self.set_output_format(format),
            EditCommand::Reset => self.reset(),
        }
    }

    /// Set the width and derive `height = round(width / aspect)`.
    pub fn set_width(&mut self, px: i64) -> ChangeSet {
        let Some(width) = positive_dimension(px) else {
            return ChangeSet::empty();
        };
        let Some(height) = derived_dimension(width as f64 / self.aspect_ratio) else {
            return ChangeSet::empty();
        };
        self.commit_dimensions(width, height)
    }

    /// Set the height and derive `width = round(height * aspect)`.
    pub fn set_height(&mut self, px: i64) -> ChangeSet {
        let Some(height) = positive_dimension(px) else {
            return ChangeSet::empty();
        };
        let Some(width) = derived_dimension(height as f64 * self.aspect_ratio) else {
            return ChangeSet::empty();
        };
        self.commit_dimensions(width, height)
    }

    /// Add `delta_deg` to the rotation, wrapping into `[0, 360)`.
    pub fn rotate(&mut self, delta_deg: i32) -> ChangeSet {
        let rotation = (self.state.rotation_deg as i64 + delta_deg as i64).rem_euclid(360) as u32;
        let mut changes = ChangeSet::empty();
        if rotation != self.state.rotation_deg {
            self.state.rotation_deg = rotation;
            changes.insert(EditField::Rotation);
        }
        changes
    }

    pub fn set_scale(&mut self, percent: f32) -> ChangeSet {
        let bounds = self.limits.scale_bounds;
        commit_clamped(&mut self.state.scale_percent, bounds.clamp(percent), EditField::Scale)
    }

    pub fn set_brightness(&mut self, percent: f32) -> ChangeSet {
        let bounds = self.limits.brightness_bounds;
        commit_clamped(
            &mut self.state.brightness_percent,
            bounds.clamp(percent),
            EditField::Brightness,
        )
    }

    pub fn set_quality(&mut self, percent: f32) -> ChangeSet {
        let bounds = self.limits.quality_bounds;
        commit_clamped(
            &mut self.state.output_quality,
            bounds.clamp(percent),
            EditField::OutputQuality,
        )
    }

    pub fn set_output_format(&mut self, format: OutputFormat) -> ChangeSet {
        let mut changes = ChangeSet::empty();
        if self.state.output_format != format {
            self.state.output_format = format;
            changes.insert(EditField::OutputFormat);
        }
        changes
    }

    /// Restore every field to its source-derived default.
    pub fn reset(&mut self) -> ChangeSet {
        let changes = diff(&self.state, &self.defaults);
        self.state = self.defaults.clone();
        changes
    }

    fn commit_dimensions(&mut self, width: u32, height: u32) -> ChangeSet {
        let mut changes = ChangeSet::empty();
        if !self.limits.fits_target(width, height) {
            log::debug!("ignored {width}x{height}: exceeds the target area limit");
            return changes;
        }
        if width != self.state.target_width {
            self.state.target_width = width;
            changes.insert(EditField::TargetWidth);
        }
        if height != self.state.target_height {
            self.state.target_height = height;
            changes.insert(EditField::TargetHeight);
        }
        changes
    }
}

fn positive_dimension(px: i64) -> Option<u32> {
    u32::try_from(px).ok().filter(|&v| v > 0)
}

fn derived_dimension(exact: f64) -> Option<u32> {
    let rounded = exact.round();
    if rounded.is_finite() && rounded >= 1.0 && rounded <= u32::MAX as f64 {
        Some(rounded as u32)
    } else {
        None
    }
}

fn commit_clamped(slot: &mut f32, value: Option<f32>, field: EditField) -> ChangeSet {
    let mut changes = ChangeSet::empty();
    if let Some(value) = value {
        if *slot != value {
            *slot = value;
            changes.insert(field);
        }
    }
    changes
}

fn diff(a: &EditState, b: &EditState) -> ChangeSet {
    let mut changes = ChangeSet::empty();
    if a.target_width != b.target_width {
        changes.insert(EditField::TargetWidth);
    }
    if a.target_height != b.target_height {
        changes.insert(EditField::TargetHeight);
    }
    if a.rotation_deg != b.rotation_deg {
        changes.insert(EditField::Rotation);
    }
    if a.scale_percent != b.scale_percent {
        changes.insert(EditField::Scale);
    }
    if a.brightness_percent != b.brightness_percent {
        changes.insert(EditField::Brightness);
    }
    if a.output_format != b.output_format {
        changes.insert(EditField::OutputFormat);
    }
    if a.output_quality != b.output_quality {
        changes.insert(EditField::OutputQuality);
    }
    changes
}
