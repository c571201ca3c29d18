//! srsforge: turns a project name, a description and up to three member names
//! into a full Software Requirements Specification, then exports it as a PDF.
//!
//! Two export paths share one [`Session`]:
//!
//! - local: the preview tree is color-sanitized, rasterized and paginated in-process
//! - remote: the document is flattened into a text payload and rendered by a backend
//!
//! The building blocks live in the `srsforge-*` workspace crates and are
//! re-exported here for convenience.

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{AppConfig, BackendConfig, ConfigError, ExportConfig, FontsConfig};
pub use error::{ExportError, PreconditionError};
pub use pipeline::{ExportOrchestrator, ExportOrchestratorBuilder, ExportPath, Session};

pub use srsforge_client::{BackendRenderClient, HttpRenderClient, RemotePayload, TransportError};
pub use srsforge_document::{ExpandedDocument, InputError, MAX_MEMBERS, RawInput, expand, expand_on};
pub use srsforge_raster::{CaptureError, CaptureExtent, CaptureOptions};
pub use srsforge_render_lopdf::{PaginationMode, RenderError};
pub use srsforge_style::{Margins, PageSize};
pub use srsforge_traits::CancellationToken;
pub use srsforge_types::{Color, ExportArtifact};
pub use srsforge_visual::{CAPTURE_TARGET_ID, PreviewTheme, SanitizeMode};
