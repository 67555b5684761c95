//! Scoped ownership of the temporary resource tied to a loaded file.
//!
//! In the browser this is an object URL created for the uploaded file. It
//! must be revoked exactly once, whether the file is replaced, the editor is
//! closed, or the owning value is simply dropped. [`PreviewGuard`] enforces
//! that.

use std::fmt;

/// A resource that must be released once when no longer needed.
pub trait PreviewResource {
    /// Release the underlying resource. Called at most once per value.
    fn release(&mut self);

    /// Human-readable handle, e.g. the object URL. Used for logging.
    fn describe(&self) -> String {
        String::from("preview resource")
    }
}

/// Owns a [`PreviewResource`] and releases it exactly once.
pub struct PreviewGuard {
    resource: Option<Box<dyn PreviewResource>>,
}

impl PreviewGuard {
    pub fn new(resource: impl PreviewResource + 'static) -> Self {
        Self {
            resource: Some(Box::new(resource)),
        }
    }

    /// Whether the resource is still held.
    pub fn is_live(&self) -> bool {
        self.resource.is_some()
    }

    pub fn describe(&self) -> Option<String> {
        self.resource.as_ref().map(|r| r.describe())
    }

    /// Release now. Later calls, and the eventual drop, do nothing.
    pub fn release(&mut self) {
        if let Some(mut resource) = self.resource.take() {
            log::debug!("releasing {}", resource.describe());
            resource.release();
        }
    }
}

impl Drop for PreviewGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for PreviewGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewGuard")
            .field("resource", &self.describe())
            .finish()
    }
}
