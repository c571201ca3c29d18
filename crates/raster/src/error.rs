use srsforge_visual::StyleChannel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Invalid capture options: {0}")]
    InvalidOptions(String),

    #[error("Capture target has no visible extent")]
    EmptyExtent,

    #[error("Unsupported color function '{function}' in {channel} of node {node}: '{value}'")]
    UnsupportedColor {
        node: String,
        channel: StyleChannel,
        function: &'static str,
        value: String,
    },

    #[error("Cannot allocate a {width}x{height} raster")]
    Allocation { width: u32, height: u32 },

    #[error("Capture cancelled")]
    Cancelled,

    #[error("Capture worker failed: {0}")]
    Worker(String),

    #[error("Failed to encode raster: {0}")]
    Encode(String),
}
