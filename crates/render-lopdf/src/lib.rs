//! Fixed-size page layout for captured rasters.
//!
//! [`PageLayoutEngine`] scales a raster to the printable width of a page, slices
//! it into page-height bands and writes each band as a Flate-compressed RGB image
//! XObject on its own PDF page.

mod engine;
mod error;
mod writer;

pub use engine::{LaidOutDocument, PageLayoutEngine, PagePlacement, PaginationMode};
pub use error::RenderError;
