//! An edit session: one source, one parameter store, one render target.
//!
//! The session is the glue between user input and the render engine. It
//! re-renders only when a command changes a field on the render dependency
//! list, and only encodes on an explicit export.

use crate::config::EditorConfig;
use crate::decode::SourceImage;
use crate::error::EditorError;
use crate::export::{self, ExportArtifact};
use crate::params::{ChangeSet, EditCommand, EditState, ParameterStore};
use crate::preview::{PreviewGuard, PreviewResource};
use crate::render::{render, InterpolationFilter, RenderTarget};
use crate::validate::{FileInfo, FileKind};

#[derive(Debug)]
pub struct EditSession {
    source: SourceImage,
    store: ParameterStore,
    target: RenderTarget,
    filter: InterpolationFilter,
    render_count: u64,
    preview: Option<PreviewGuard>,
}

impl EditSession {
    /// Validate, decode and render an uploaded file.
    ///
    /// Fails without creating anything if the file is rejected, is not an
    /// image, or does not decode.
    pub fn open(file: &FileInfo, bytes: &[u8], config: &EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;

        let kind = config.validator().accept(file)?;
        if kind != FileKind::Image {
            return Err(EditorError::NotEditable(kind));
        }

        let source = SourceImage::decode(bytes, file.name.as_str(), file.mime_type.as_str())
            .inspect_err(|e| log::warn!("could not decode {}: {e}", file.name))?;
        Ok(Self::new(source, config))
    }

    /// Start a session on an already decoded source.
    pub fn new(source: SourceImage, config: &EditorConfig) -> Self {
        let store = ParameterStore::for_source(&source, config.limits);
        let filter = InterpolationFilter::default();
        let target = render(source.image(), store.state(), filter);
        log::debug!(
            "opened {} ({}x{})",
            source.file_name(),
            source.natural_width(),
            source.natural_height()
        );
        Self {
            source,
            store,
            target,
            filter,
            render_count: 1,
            preview: None,
        }
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    pub fn state(&self) -> &EditState {
        self.store.state()
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// How many times the target has been rasterized, including the first.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn filter(&self) -> InterpolationFilter {
        self.filter
    }

    /// Switch interpolation; re-renders if it differs.
    pub fn set_filter(&mut self, filter: InterpolationFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.rerender();
        }
    }

    /// Apply one edit, re-rendering if it touched a render dependency.
    pub fn apply(&mut self, command: EditCommand) -> ChangeSet {
        let changes = self.store.apply(command);
        if changes.invalidates_render() {
            self.rerender();
        }
        changes
    }

    /// Encode the current target. State and target are untouched either way.
    pub fn export(&self) -> Result<ExportArtifact, EditorError> {
        Ok(export::export(
            &self.target,
            self.store.state(),
            self.source.file_name(),
        )?)
    }

    /// Take ownership of the preview resource for this file, releasing any
    /// previous one.
    pub fn attach_preview(&mut self, resource: impl PreviewResource + 'static) {
        self.preview = Some(PreviewGuard::new(resource));
    }

    pub fn preview(&self) -> Option<&PreviewGuard> {
        self.preview.as_ref()
    }

    /// Release the preview resource now. Dropping the session does the same.
    pub fn close(mut self) {
        if let Some(mut guard) = self.preview.take() {
            guard.release();
        }
    }

    fn rerender(&mut self) {
        self.target = render(self.source.image(), self.store.state(), self.filter);
        self.render_count += 1;
    }
}
