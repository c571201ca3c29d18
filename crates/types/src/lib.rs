pub mod artifact;
pub mod color;
pub mod geometry;
pub mod ids;

pub use artifact::{ExportArtifact, PDF_MEDIA_TYPE};
pub use color::Color;
pub use geometry::{Rect, Size};
pub use ids::{NodeId, ResourceUri};
