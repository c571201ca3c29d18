use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

fn is_one(num: &f32) -> bool {
    *num == 1.0
}

/// An sRGB color with 8-bit channels and a floating point alpha in `0.0..=1.0`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(skip_serializing_if = "is_one")]
    pub a: f32,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.r.hash(state);
        self.g.hash(state);
        self.b.hash(state);
        self.a.to_bits().hash(state);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 1.0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 1.0 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0.0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a: a.clamp(0.0, 1.0) }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Formats the color as a CSS `rgb()`/`rgba()` value.
    ///
    /// The output always parses back to the same color, so writing it into a
    /// style channel is stable across repeated passes.
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = (self.a * 1000.0).round() / 1000.0;
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_output_for_opaque_and_translucent() {
        assert_eq!(Color::rgb(12, 34, 56).to_css(), "rgb(12, 34, 56)");
        assert_eq!(Color::rgba(12, 34, 56, 0.5).to_css(), "rgba(12, 34, 56, 0.5)");
    }

    #[test]
    fn display_matches_css_output() {
        assert_eq!(Color::BLACK.to_string(), "rgb(0, 0, 0)");
        assert!(Color::TRANSPARENT.is_transparent());
        assert!(!Color::rgba(1, 2, 3, 0.4).is_opaque());
    }
}
