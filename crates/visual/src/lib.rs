//! The rendered visual representation of an SRS document.
//!
//! - [`PreviewRenderer`] lays an expanded document out into a [`VisualTree`]
//! - [`ColorSanitizer`] rewrites color values the rasterizer cannot sample
//! - [`FontBook`] supplies metrics for layout and outlines for painting

pub mod fonts;
pub mod preview;
pub mod sanitize;
pub mod style;
pub mod tree;

pub use fonts::{FontBook, FontError, LineMetrics};
pub use preview::{CAPTURE_TARGET_ID, DEFAULT_PREVIEW_WIDTH, PreviewRenderer, PreviewTheme};
pub use sanitize::{ColorSanitizer, SanitizeMode, SanitizeReport};
pub use style::{ComputedStyle, StyleChannel};
pub use tree::{Descendants, NodeKind, TextRun, VisualNode, VisualTree};
