use srsforge_client::BackendRenderClient;
use std::sync::Arc;
use std::time::Duration;

/// Selects which of the two export paths produces the artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportPath {
    /// Sanitize, rasterize and paginate the preview in-process. (Default)
    #[default]
    Local,
    /// Send the flattened document to the rendering backend.
    Remote,
}

/// Where the remote path sends its payload.
#[derive(Debug, Clone, Default)]
pub(crate) enum BackendSource {
    #[default]
    Unconfigured,
    Http {
        base_url: String,
        timeout: Option<Duration>,
    },
    Client(Arc<dyn BackendRenderClient>),
}
