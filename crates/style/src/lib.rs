pub mod color_space;
pub mod dimension;
pub mod font;
pub mod parsers;

pub use color_space::{lab_to_srgb, lch_to_srgb, oklab_to_srgb, oklch_to_srgb};
pub use dimension::{Margins, PageSize};
pub use font::FontWeight;
pub use parsers::{
    ColorSupport, StyleParseError, UNSUPPORTED_COLOR_FUNCTIONS, classify_color, find_unsupported_function,
    parse_color, run_parser,
};
