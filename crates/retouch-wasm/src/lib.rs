//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editor to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `editor` - `JsImageEditor`, one open image with its edit state and canvas
//! - `validate` - upload checks before the bytes are read
//! - `config` - editor options passed from JavaScript
//! - `preview` - object URLs tied to the uploaded file
//! - `logger` - `log` output routed to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { validate_file, JsImageEditor } from '@retouch/wasm';
//!
//! await init();
//!
//! const kind = validate_file(file.name, file.type, file.size, undefined);
//! if (kind === 'image') {
//!   const bytes = new Uint8Array(await file.arrayBuffer());
//!   const editor = new JsImageEditor(bytes, file.name, file.type, undefined);
//!   console.log(`Canvas ${editor.width}x${editor.height}`);
//! }
//! ```

use wasm_bindgen::prelude::*;

mod config;
mod editor;
mod logger;
mod preview;
mod validate;

pub use config::default_options;
pub use editor::{JsExportArtifact, JsImageEditor};
pub use validate::validate_file;

/// Initialize the WASM module (called automatically on load)
///
/// Routes panics and `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::install(logger::default_level());
    log::debug!("retouch {} ready", version());
}

/// Change console verbosity: `"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"` or `"trace"`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level \"{}\"", level)))?;
    logger::install(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
