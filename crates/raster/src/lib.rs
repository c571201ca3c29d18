//! Rasterization of a visual subtree.
//!
//! [`Rasterizer::capture`] walks the subtree into a display list, loads embedded
//! images through a [`ResourceProvider`](srsforge_traits::ResourceProvider), and
//! paints everything with tiny-skia on a blocking worker.

mod error;
mod image;
mod options;
mod paint;
mod rasterizer;

pub use error::CaptureError;
pub use image::RasterImage;
pub use options::{CaptureExtent, CaptureOptions, MAX_CAPTURE_PIXELS};
pub use rasterizer::{Capture, Rasterizer};
