//! Editor configuration from JavaScript.

use retouch_core::EditorConfig;
use wasm_bindgen::prelude::*;

/// Read an options object. `undefined` or `null` gives the defaults; missing
/// keys fall back individually.
pub(crate) fn config_from_js(value: JsValue) -> Result<EditorConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EditorConfig::default());
    }
    let config: EditorConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid editor options: {}", e)))?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

/// The default options, as a plain JS object.
#[wasm_bindgen]
pub fn default_options() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&EditorConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
