//! Image editor bindings.
//!
//! [`JsImageEditor`] wraps a core [`EditSession`]. The page feeds it control
//! values and redraws its canvas from [`JsImageEditor::pixels`] whenever a
//! setter reports that the render changed.
//!
//! # Example
//!
//! ```typescript
//! import { JsImageEditor } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const editor = new JsImageEditor(bytes, file.name, file.type, undefined);
//! const previewUrl = editor.attach_source_blob(file);
//!
//! if (editor.rotate(90)) {
//!   const data = new ImageData(new Uint8ClampedArray(editor.pixels()), editor.width, editor.height);
//!   ctx.putImageData(data, 0, 0);
//! }
//!
//! const artifact = editor.export();
//! const url = URL.createObjectURL(artifact.to_blob());
//! ```

use js_sys::{Array, Uint8Array};
use retouch_core::{
    EditCommand, EditSession, EditorConfig, EditorError, ExportArtifact, FileInfo,
    InterpolationFilter, OutputFormat,
};
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag};

use crate::config::config_from_js;
use crate::preview::ObjectUrl;

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// An open image with its current edit state and rendered canvas.
#[wasm_bindgen]
pub struct JsImageEditor {
    session: EditSession,
}

#[wasm_bindgen]
impl JsImageEditor {
    /// Validate, decode and render an uploaded file.
    ///
    /// `options` is an editor options object or `undefined`. Throws with a
    /// user-facing message if the file is rejected or cannot be decoded.
    #[wasm_bindgen(constructor)]
    pub fn new(
        bytes: &[u8],
        file_name: &str,
        mime_type: &str,
        options: JsValue,
    ) -> Result<JsImageEditor, JsValue> {
        let config = config_from_js(options)?;
        Self::open(bytes, file_name, mime_type, &config).map_err(to_js)
    }

    /// Canvas width in pixels.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.session.state().target_width
    }

    /// Canvas height in pixels.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.session.state().target_height
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u32 {
        self.session.state().rotation_deg
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f32 {
        self.session.state().scale_percent
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.session.state().brightness_percent
    }

    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.session.state().output_quality
    }

    /// `"jpeg"`, `"png"` or `"webp"`.
    #[wasm_bindgen(getter)]
    pub fn output_format(&self) -> String {
        self.session.state().output_format.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn natural_width(&self) -> u32 {
        self.session.source().natural_width()
    }

    #[wasm_bindgen(getter)]
    pub fn natural_height(&self) -> u32 {
        self.session.source().natural_height()
    }

    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.session.source().file_name().to_string()
    }

    /// The whole edit state as a plain object: `targetWidth`,
    /// `targetHeight`, `rotationDeg`, `scalePercent`, `brightnessPercent`,
    /// `outputFormat` and `outputQuality`. Handy for syncing form controls.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.session.state()).map_err(to_js)
    }

    /// Set the canvas width; height follows the source aspect ratio.
    ///
    /// Returns `true` if the canvas must be redrawn. Non-integer or
    /// non-positive input is ignored.
    pub fn set_width(&mut self, width: f64) -> bool {
        match whole_pixels(width) {
            Some(w) => self.redraw(EditCommand::SetWidth(w)),
            None => false,
        }
    }

    /// Set the canvas height; width follows the source aspect ratio.
    pub fn set_height(&mut self, height: f64) -> bool {
        match whole_pixels(height) {
            Some(h) => self.redraw(EditCommand::SetHeight(h)),
            None => false,
        }
    }

    /// Rotate by `degrees` (clockwise, multiples of 90 in the UI).
    pub fn rotate(&mut self, degrees: i32) -> bool {
        self.redraw(EditCommand::Rotate(degrees))
    }

    pub fn set_scale(&mut self, percent: f32) -> bool {
        self.redraw(EditCommand::SetScale(percent))
    }

    pub fn set_brightness(&mut self, percent: f32) -> bool {
        self.redraw(EditCommand::SetBrightness(percent))
    }

    /// Export quality, percent. Never changes the canvas; returns whether the
    /// stored value changed.
    pub fn set_quality(&mut self, percent: f32) -> bool {
        !self.session.apply(EditCommand::SetQuality(percent)).is_empty()
    }

    /// Export format by name. Never changes the canvas; returns whether the
    /// stored value changed.
    pub fn set_output_format(&mut self, format: &str) -> Result<bool, JsValue> {
        let format: OutputFormat = format.parse().map_err(to_js)?;
        Ok(!self
            .session
            .apply(EditCommand::SetOutputFormat(format))
            .is_empty())
    }

    /// Use nearest-neighbour sampling instead of bilinear.
    pub fn set_pixelated(&mut self, pixelated: bool) {
        let filter = if pixelated {
            InterpolationFilter::Nearest
        } else {
            InterpolationFilter::Bilinear
        };
        self.session.set_filter(filter);
    }

    /// Restore every parameter to its initial value.
    pub fn reset(&mut self) -> bool {
        self.redraw(EditCommand::Reset)
    }

    /// Canvas pixels as RGBA bytes (a copy), ready for `ImageData`.
    pub fn pixels(&self) -> Vec<u8> {
        self.session.target().pixels.clone()
    }

    /// Encode the canvas with the current format and quality.
    pub fn export(&self) -> Result<JsExportArtifact, JsValue> {
        self.session
            .export()
            .map(JsExportArtifact::from_artifact)
            .map_err(to_js)
    }

    /// Create an object URL for the uploaded file and keep it until the file
    /// is replaced or the editor is closed. Returns the URL.
    pub fn attach_source_blob(&mut self, blob: &Blob) -> Result<String, JsValue> {
        let resource = ObjectUrl::create(blob)?;
        let url = resource.url().to_string();
        self.session.attach_preview(resource);
        Ok(url)
    }

    /// Release the preview URL and free the editor.
    pub fn close(self) {
        self.session.close();
    }
}

impl JsImageEditor {
    pub(crate) fn open(
        bytes: &[u8],
        file_name: &str,
        mime_type: &str,
        config: &EditorConfig,
    ) -> Result<Self, EditorError> {
        let file = FileInfo::new(file_name, mime_type, bytes.len() as u64);
        let session = EditSession::open(&file, bytes, config)?;
        Ok(Self { session })
    }

    fn redraw(&mut self, command: EditCommand) -> bool {
        self.session.apply(command).invalidates_render()
    }
}

/// Integer pixel counts from a JS number. Fractions and NaN are rejected;
/// the store itself rejects values below one and canvases over its area limit.
fn whole_pixels(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

/// An encoded export.
#[wasm_bindgen]
pub struct JsExportArtifact {
    bytes: Vec<u8>,
    file_name: String,
    mime_type: String,
}

#[wasm_bindgen]
impl JsExportArtifact {
    /// Encoded file contents (a copy).
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Suggested download name, e.g. `holiday-edited.webp`.
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Wrap the bytes in a typed `Blob` for download.
    pub fn to_blob(&self) -> Result<Blob, JsValue> {
        let parts = Array::new();
        parts.push(&Uint8Array::from(self.bytes.as_slice()));
        let options = BlobPropertyBag::new();
        options.set_type(&self.mime_type);
        Blob::new_with_u8_array_sequence_and_options(&parts, &options)
    }
}

impl JsExportArtifact {
    pub(crate) fn from_artifact(artifact: ExportArtifact) -> Self {
        Self {
            mime_type: artifact.mime_type().to_string(),
            bytes: artifact.bytes,
            file_name: artifact.file_name,
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn jpeg_bytes() -> Vec<u8> {
        retouch_core::encode::encode_jpeg(&[200u8; 20 * 10 * 4], 20, 10, 0.9).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_constructor_and_export() {
        let bytes = jpeg_bytes();
        let mut editor =
            JsImageEditor::new(&bytes, "shot.jpg", "image/jpeg", JsValue::UNDEFINED).unwrap();
        assert_eq!(editor.output_format(), "jpeg");
        assert!(editor.set_output_format("webp").unwrap());

        let artifact = editor.export().unwrap();
        assert_eq!(artifact.file_name(), "shot-edited.webp");
        let blob = artifact.to_blob().unwrap();
        assert_eq!(blob.type_(), "image/webp");
        assert_eq!(blob.size() as usize, artifact.byte_length());
    }

    #[wasm_bindgen_test]
    fn test_state_object() {
        let bytes = jpeg_bytes();
        let mut editor =
            JsImageEditor::new(&bytes, "shot.jpg", "image/jpeg", JsValue::UNDEFINED).unwrap();
        editor.rotate(-90);
        let state = editor.state().unwrap();

        let get = |key: &str| js_sys::Reflect::get(&state, &JsValue::from_str(key)).unwrap();
        assert_eq!(get("targetWidth").as_f64(), Some(20.0));
        assert_eq!(get("targetHeight").as_f64(), Some(10.0));
        assert_eq!(get("rotationDeg").as_f64(), Some(270.0));
        assert_eq!(get("outputFormat").as_string().as_deref(), Some("jpeg"));
        assert_eq!(get("outputQuality").as_f64(), Some(90.0));
    }

    #[wasm_bindgen_test]
    fn test_unknown_format_throws() {
        let bytes = jpeg_bytes();
        let mut editor =
            JsImageEditor::new(&bytes, "shot.jpg", "image/jpeg", JsValue::UNDEFINED).unwrap();
        assert!(editor.set_output_format("tiff").is_err());
        assert_eq!(editor.output_format(), "jpeg");
    }

    #[wasm_bindgen_test]
    fn test_attach_blob_and_close() {
        let bytes = jpeg_bytes();
        let mut editor =
            JsImageEditor::new(&bytes, "shot.jpg", "image/jpeg", JsValue::UNDEFINED).unwrap();
        let parts = Array::new();
        parts.push(&Uint8Array::from(bytes.as_slice()));
        let blob = Blob::new_with_u8_array_sequence(&parts).unwrap();

        let url = editor.attach_source_blob(&blob).unwrap();
        assert!(url.starts_with("blob:"));
        editor.close();
    }

    #[wasm_bindgen_test]
    fn test_corrupt_bytes_throw() {
        let result = JsImageEditor::new(&[0, 1, 2, 3], "bad.jpg", "image/jpeg", JsValue::UNDEFINED);
        assert!(result.is_err());
    }
}
