use super::config::ExportPath;
use super::session::Session;
use crate::config::ConfigError;
use crate::error::{ExportError, PreconditionError};
use srsforge_client::{BackendRenderClient, RemotePayload};
use srsforge_raster::{CaptureOptions, Rasterizer};
use srsforge_render_lopdf::PageLayoutEngine;
use srsforge_traits::CancellationToken;
use srsforge_types::{ExportArtifact, NodeId};
use srsforge_visual::{ColorSanitizer, PreviewRenderer, VisualTree};
use std::sync::Arc;

/// Sequences the local and remote export paths over a [`Session`].
///
/// Built by [`ExportOrchestratorBuilder`](super::ExportOrchestratorBuilder). Holds
/// no per-export state, so one orchestrator can serve any number of exports.
#[derive(Debug)]
pub struct ExportOrchestrator {
    pub(crate) preview: PreviewRenderer,
    pub(crate) sanitizer: ColorSanitizer,
    pub(crate) rasterizer: Rasterizer,
    pub(crate) capture: CaptureOptions,
    pub(crate) layout: PageLayoutEngine,
    pub(crate) capture_target: NodeId,
    pub(crate) backend: Option<Arc<dyn BackendRenderClient>>,
}

impl ExportOrchestrator {
    pub fn preview_renderer(&self) -> &PreviewRenderer {
        &self.preview
    }

    pub fn capture_target(&self) -> &NodeId {
        &self.capture_target
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Renders the session's document with this orchestrator's preview renderer.
    pub fn preview<'s>(&self, session: &'s mut Session) -> Result<&'s VisualTree, PreconditionError> {
        session.preview(&self.preview)
    }

    pub async fn export(
        &self,
        path: ExportPath,
        session: &mut Session,
        cancel: &CancellationToken,
    ) -> Result<ExportArtifact, ExportError> {
        match path {
            ExportPath::Local => self.export_local(session, cancel).await,
            ExportPath::Remote => self.export_remote(session, cancel).await,
        }
    }

    /// Sanitizes, captures and paginates the session's preview.
    ///
    /// Both preconditions are checked before any work starts. The sanitizer
    /// rewrites the preview tree in place.
    pub async fn export_local(
        &self,
        session: &mut Session,
        cancel: &CancellationToken,
    ) -> Result<ExportArtifact, ExportError> {
        let title_name = session
            .document()
            .ok_or(PreconditionError::NotExpanded)?
            .cover()
            .project_name()
            .to_string();
        let file_stem = session.input().project_name().to_string();
        let target = session
            .visual_tree_mut()
            .and_then(|tree| tree.find_mut(&self.capture_target))
            .ok_or_else(|| PreconditionError::MissingCaptureTarget(self.capture_target.to_string()))?;

        let report = self.sanitizer.sanitize(target);
        log::debug!(
            "Sanitized capture target '{}': {} value(s) rewritten",
            self.capture_target,
            report.values_rewritten
        );

        let capture = self.rasterizer.capture(target, &self.capture, cancel).await?;
        if !capture.skipped_resources.is_empty() {
            log::warn!(
                "{} embedded resource(s) left out of the export",
                capture.skipped_resources.len()
            );
        }

        let laid_out = self
            .layout
            .clone()
            .with_title(format!("{title_name} - Software Requirements Specification"))
            .layout(&capture.image)?;
        let artifact = ExportArtifact::pdf(&file_stem, laid_out.bytes);
        log::info!(
            "Local export finished: {} ({} page(s), {} bytes)",
            artifact.filename(),
            laid_out.page_count,
            artifact.len()
        );
        Ok(artifact)
    }

    /// Sends the flattened document to the rendering backend and returns its
    /// response bytes unchanged.
    pub async fn export_remote(
        &self,
        session: &Session,
        cancel: &CancellationToken,
    ) -> Result<ExportArtifact, ExportError> {
        let document = session.document().ok_or(PreconditionError::NotExpanded)?;
        let backend = self.backend.as_ref().ok_or(ConfigError::MissingBackend)?;

        let payload = RemotePayload::from_document(document);
        let bytes = backend.render(&payload, cancel).await?;
        // Named from the raw input so a blank name falls back to "project".
        let artifact = ExportArtifact::pdf(session.input().project_name(), bytes);
        log::info!(
            "Remote export finished: {} ({} bytes)",
            artifact.filename(),
            artifact.len()
        );
        Ok(artifact)
    }
}
