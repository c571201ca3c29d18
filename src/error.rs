use crate::config::ConfigError;
use srsforge_client::TransportError;
use srsforge_document::InputError;
use srsforge_raster::CaptureError;
use srsforge_render_lopdf::RenderError;
use srsforge_visual::FontError;
use thiserror::Error;

/// Export was asked for before its inputs existed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("Generate the SRS first: no document has been expanded")]
    NotExpanded,

    #[error("Capture target '{0}' is not present in the rendered preview")]
    MissingCaptureTarget(String),
}

/// Every way producing an export artifact can fail.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Capture failed: {0}")]
    Capture(CaptureError),

    #[error("Page layout failed: {0}")]
    Render(#[from] RenderError),

    #[error("Remote render failed: {0}")]
    Transport(TransportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Font loading failed: {0}")]
    Font(#[from] FontError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export cancelled")]
    Cancelled,
}

impl From<CaptureError> for ExportError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::Cancelled => ExportError::Cancelled,
            other => ExportError::Capture(other),
        }
    }
}

impl From<TransportError> for ExportError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Cancelled => ExportError::Cancelled,
            other => ExportError::Transport(other),
        }
    }
}
