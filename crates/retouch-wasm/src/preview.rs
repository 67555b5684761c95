//! Object URLs for the uploaded file.
//!
//! The URL is handed to the page (e.g. as an `<img>` or `<embed>` source) and
//! revoked through [`PreviewGuard`](retouch_core::PreviewGuard) when the file
//! is replaced or the editor closes.

use retouch_core::PreviewResource;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, Url};

pub(crate) struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    pub(crate) fn create(blob: &Blob) -> Result<Self, JsValue> {
        let url = Url::create_object_url_with_blob(blob)?;
        Ok(Self { url })
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }
}

impl PreviewResource for ObjectUrl {
    fn release(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.url) {
            log::warn!("could not revoke {}: {:?}", self.url, e);
        }
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
