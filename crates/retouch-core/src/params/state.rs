//! The edit state record and change tracking.

use serde::Serialize;

use super::OutputFormat;

/// Current user-adjustable transform and export parameters.
///
/// Fields are public for reading; all mutation goes through
/// [`ParameterStore`](super::ParameterStore) so the invariants hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditState {
    /// Render target width in pixels, always > 0.
    pub target_width: u32,
    /// Render target height in pixels, always > 0.
    pub target_height: u32,
    /// Clockwise rotation in degrees, always in `[0, 360)`.
    pub rotation_deg: u32,
    /// Uniform scale, percent.
    pub scale_percent: f32,
    /// Brightness multiplier, percent.
    pub brightness_percent: f32,
    pub output_format: OutputFormat,
    /// Encoder quality, percent. Ignored for PNG.
    pub output_quality: f32,
}

impl EditState {
    /// `scale_percent` as a multiplier.
    pub fn scale_factor(&self) -> f64 {
        self.scale_percent as f64 / 100.0
    }

    /// `brightness_percent` as a multiplier.
    pub fn brightness_factor(&self) -> f32 {
        self.brightness_percent / 100.0
    }

    /// `output_quality` normalized to `[0, 1]`.
    pub fn quality_factor(&self) -> f32 {
        self.output_quality / 100.0
    }
}

/// A single field of [`EditState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    TargetWidth,
    TargetHeight,
    Rotation,
    Scale,
    Brightness,
    OutputFormat,
    OutputQuality,
}

/// Fields whose change invalidates the current render target.
///
/// Format and quality are deliberately absent: they only matter at export.
pub const RENDER_DEPENDENCIES: [EditField; 5] = [
    EditField::TargetWidth,
    EditField::TargetHeight,
    EditField::Rotation,
    EditField::Scale,
    EditField::Brightness,
];

impl EditField {
    pub const ALL: [EditField; 7] = [
        EditField::TargetWidth,
        EditField::TargetHeight,
        EditField::Rotation,
        EditField::Scale,
        EditField::Brightness,
        EditField::OutputFormat,
        EditField::OutputQuality,
    ];

    pub fn invalidates_render(self) -> bool {
        RENDER_DEPENDENCIES.contains(&self)
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// The set of fields a mutation actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeSet(u8);

impl ChangeSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, field: EditField) {
        self.0 |= field.bit();
    }

    pub fn contains(self, field: EditField) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: ChangeSet) -> ChangeSet {
        ChangeSet(self.0 | other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = EditField> {
        EditField::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// True if any changed field is a render dependency.
    pub fn invalidates_render(self) -> bool {
        self.iter().any(EditField::invalidates_render)
    }
}

impl FromIterator<EditField> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = EditField>>(iter: I) -> Self {
        let mut set = ChangeSet::empty();
        for field in iter {
            set.insert(field);
        }
        set
    }
}
