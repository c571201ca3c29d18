//! Rewrites color values the rasterizer cannot sample.
//!
//! Every node's three color channels are checked for an unsupported color
//! function. Matches are replaced with a plain `rgb()`/`rgba()` value, either the
//! exact sRGB conversion or a fixed fallback. Values without such a function are
//! left untouched, so a second pass finds nothing to do.

use crate::style::StyleChannel;
use crate::tree::VisualNode;
use serde::{Deserialize, Serialize};
use srsforge_style::{ColorSupport, classify_color, find_unsupported_function};
use srsforge_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizeMode {
    /// Convert single perceptual colors to sRGB; everything else gets the fallback.
    #[default]
    Convert,
    /// Replace every unsupported value with the fallback.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SanitizeReport {
    pub nodes_visited: usize,
    pub values_rewritten: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSanitizer {
    mode: SanitizeMode,
    fallback: Color,
}

impl Default for ColorSanitizer {
    fn default() -> Self {
        Self {
            mode: SanitizeMode::default(),
            fallback: Color::BLACK,
        }
    }
}

impl ColorSanitizer {
    pub fn new(mode: SanitizeMode, fallback: Color) -> Self {
        Self { mode, fallback }
    }

    pub fn mode(&self) -> SanitizeMode {
        self.mode
    }

    pub fn fallback(&self) -> Color {
        self.fallback
    }

    /// The safe replacement for `value`, or `None` when it needs no rewrite.
    pub fn replacement_for(&self, value: &str) -> Option<Color> {
        find_unsupported_function(value)?;
        let color = match (self.mode, classify_color(value)) {
            (SanitizeMode::Convert, ColorSupport::Convertible(color)) => color,
            _ => self.fallback,
        };
        Some(color)
    }

    /// Sanitizes `root` and its whole subtree in place.
    pub fn sanitize(&self, root: &mut VisualNode) -> SanitizeReport {
        let mut report = SanitizeReport::default();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            report.nodes_visited += 1;
            for channel in StyleChannel::ALL {
                let Some(value) = node.style.channel(channel) else {
                    continue;
                };
                if let Some(color) = self.replacement_for(value) {
                    let css = color.to_css();
                    log::debug!(
                        "Rewrote {} on node {:?}: '{}' -> '{}'",
                        channel,
                        node.id.as_ref().map(|id| id.as_str()),
                        value,
                        css
                    );
                    node.style.set_channel(channel, css);
                    report.values_rewritten += 1;
                }
            }
            stack.extend(node.children.iter_mut());
        }

        log::info!(
            "Color sanitizer visited {} node(s), rewrote {} value(s)",
            report.nodes_visited,
            report.values_rewritten
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ComputedStyle;
    use srsforge_types::Rect;

    fn tree() -> VisualNode {
        let frame = Rect::new(0.0, 0.0, 10.0, 10.0);
        VisualNode::block(
            frame,
            ComputedStyle::default()
                .with_color("oklch(1 0 0)")
                .with_background("#fff")
                .with_border(1.0, "color-mix(in srgb, red, blue)"),
        )
        .with_id("root")
        .with_child(VisualNode::block(
            frame,
            ComputedStyle::default().with_color("OKLAB(0 0 0)").with_background("rgb(1, 2, 3)"),
        ))
        .with_child(VisualNode::block(frame, ComputedStyle::default().with_background("var(--bg)")))
    }

    #[test]
    fn converts_perceptual_colors_and_falls_back_otherwise() {
        let mut root = tree();
        let report = ColorSanitizer::default().sanitize(&mut root);
        assert_eq!(report, SanitizeReport { nodes_visited: 3, values_rewritten: 3 });

        assert_eq!(root.style.color.as_deref(), Some("rgb(255, 255, 255)"));
        assert_eq!(root.style.background_color.as_deref(), Some("#fff"));
        assert_eq!(root.style.border_color.as_deref(), Some("rgb(0, 0, 0)"));
        assert_eq!(root.children[0].style.color.as_deref(), Some("rgb(0, 0, 0)"));
        assert_eq!(root.children[0].style.background_color.as_deref(), Some("rgb(1, 2, 3)"));
        // Not an unsupported function, so it is not this pass's concern.
        assert_eq!(root.children[1].style.background_color.as_deref(), Some("var(--bg)"));
    }

    #[test]
    fn fallback_mode_ignores_conversions() {
        let mut root = tree();
        let sanitizer = ColorSanitizer::new(SanitizeMode::Fallback, Color::rgb(9, 9, 9));
        sanitizer.sanitize(&mut root);
        assert_eq!(root.style.color.as_deref(), Some("rgb(9, 9, 9)"));
        assert_eq!(root.style.border_color.as_deref(), Some("rgb(9, 9, 9)"));
    }

    #[test]
    fn sanitizing_twice_is_a_no_op() {
        let mut once = tree();
        let sanitizer = ColorSanitizer::default();
        sanitizer.sanitize(&mut once);

        let mut twice = once.clone();
        let second = sanitizer.sanitize(&mut twice);
        assert_eq!(second.values_rewritten, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn translucent_conversion_keeps_alpha() {
        let sanitizer = ColorSanitizer::default();
        assert_eq!(
            sanitizer.replacement_for("oklch(0 0 0 / 0.25)"),
            Some(Color::rgba(0, 0, 0, 0.25))
        );
        assert_eq!(sanitizer.replacement_for("hsl(0, 0%, 50%)"), None);
    }

    #[test]
    fn mode_deserializes_lowercase() {
        let mode: SanitizeMode = serde_json::from_str("\"fallback\"").unwrap();
        assert_eq!(mode, SanitizeMode::Fallback);
    }
}
