//! Display list construction and tiny-skia painting.
//!
//! Nodes paint in pre-order: background, then border, then own content, then
//! children. Text color inherits from the nearest ancestor that sets one.

use crate::error::CaptureError;
use crate::image::RasterImage;
use srsforge_style::{ColorSupport, classify_color, find_unsupported_function};
use srsforge_types::{Color, Rect, ResourceUri};
use srsforge_visual::{FontBook, NodeKind, StyleChannel, TextRun, VisualNode};
use std::collections::HashMap;
use tiny_skia::{FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

const FALLBACK_ADVANCE_EM: f32 = 0.55;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PaintOp {
    Fill { rect: Rect, color: Color },
    Border { rect: Rect, width: f32, color: Color },
    Text { frame: Rect, run: TextRun, color: Color },
    Image { frame: Rect, source: ResourceUri },
}

#[derive(Debug, Clone, Default)]
pub(crate) struct DisplayList {
    pub(crate) ops: Vec<PaintOp>,
}

impl DisplayList {
    /// Flattens `target` into paint operations.
    ///
    /// Fails on the first color value that still uses an unsupported color
    /// function; values that are merely malformed are skipped with a warning.
    pub(crate) fn build(target: &VisualNode) -> Result<Self, CaptureError> {
        let mut list = DisplayList::default();
        list.visit(target, Color::BLACK)?;
        Ok(list)
    }

    fn visit(&mut self, node: &VisualNode, inherited: Color) -> Result<(), CaptureError> {
        let style = &node.style;
        let color = resolve(node, StyleChannel::Color, style.color.as_deref())?.unwrap_or(inherited);
        let background = resolve(node, StyleChannel::BackgroundColor, style.background_color.as_deref())?;
        let border = resolve(node, StyleChannel::BorderColor, style.border_color.as_deref())?;

        if let Some(background) = background.filter(|c| !c.is_transparent()) {
            self.ops.push(PaintOp::Fill {
                rect: node.frame,
                color: background,
            });
        }
        if style.border_width > 0.0 {
            // An unset border color follows the text color, as in CSS.
            let border = border.unwrap_or(color);
            if !border.is_transparent() {
                self.ops.push(PaintOp::Border {
                    rect: node.frame,
                    width: style.border_width,
                    color: border,
                });
            }
        }
        match &node.kind {
            NodeKind::Block => {}
            NodeKind::Text(run) => self.ops.push(PaintOp::Text {
                frame: node.frame,
                run: run.clone(),
                color,
            }),
            NodeKind::Image { source } => self.ops.push(PaintOp::Image {
                frame: node.frame,
                source: source.clone(),
            }),
        }

        for child in &node.children {
            self.visit(child, color)?;
        }
        Ok(())
    }

    /// Distinct image sources in paint order.
    pub(crate) fn image_sources(&self) -> Vec<ResourceUri> {
        let mut sources: Vec<ResourceUri> = Vec::new();
        for op in &self.ops {
            if let PaintOp::Image { source, .. } = op {
                if !sources.contains(source) {
                    sources.push(source.clone());
                }
            }
        }
        sources
    }
}

fn resolve(node: &VisualNode, channel: StyleChannel, value: Option<&str>) -> Result<Option<Color>, CaptureError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match classify_color(value) {
        ColorSupport::Supported(color) => Ok(Some(color)),
        ColorSupport::Convertible(_) | ColorSupport::Unsupported(_) => Err(CaptureError::UnsupportedColor {
            node: node
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "<anonymous>".to_string()),
            channel,
            function: find_unsupported_function(value).unwrap_or("unknown"),
            value: value.to_string(),
        }),
        ColorSupport::Invalid => {
            log::warn!("Ignoring unparseable {} value '{}'", channel, value);
            Ok(None)
        }
    }
}

/// What the painter produced besides pixels.
#[derive(Debug, Default)]
pub(crate) struct PaintStats {
    pub(crate) skipped_text_runs: usize,
}

pub(crate) struct Painter<'a> {
    pub(crate) fonts: &'a FontBook,
    pub(crate) images: &'a HashMap<ResourceUri, RasterImage>,
    /// Maps tree coordinates to device pixels.
    pub(crate) base: Transform,
}

impl Painter<'_> {
    pub(crate) fn paint(
        &self,
        list: &DisplayList,
        width: u32,
        height: u32,
        background: Option<Color>,
    ) -> Result<(RasterImage, PaintStats), CaptureError> {
        let mut pixmap = Pixmap::new(width, height).ok_or(CaptureError::Allocation { width, height })?;
        if let Some(background) = background {
            pixmap.fill(to_skia(background));
        }

        let mut stats = PaintStats::default();
        for op in &list.ops {
            match op {
                PaintOp::Fill { rect, color } => self.fill_rect(&mut pixmap, *rect, *color),
                PaintOp::Border { rect, width, color } => self.stroke_border(&mut pixmap, *rect, *width, *color),
                PaintOp::Text { frame, run, color } => {
                    if !self.draw_text(&mut pixmap, *frame, run, *color) {
                        stats.skipped_text_runs += 1;
                    }
                }
                PaintOp::Image { frame, source } => {
                    if let Some(image) = self.images.get(source) {
                        self.draw_image(&mut pixmap, *frame, image);
                    }
                }
            }
        }

        if stats.skipped_text_runs > 0 {
            log::warn!(
                "No font face available; skipped {} text run(s)",
                stats.skipped_text_runs
            );
        }
        Ok((RasterImage::from_pixmap(&pixmap), stats))
    }

    fn fill_rect(&self, pixmap: &mut Pixmap, rect: Rect, color: Color) {
        let Some(rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        pixmap.fill_rect(rect, &solid(color), self.base, None);
    }

    /// Draws the border inside the frame as four edge bands.
    fn stroke_border(&self, pixmap: &mut Pixmap, rect: Rect, width: f32, color: Color) {
        let w = width.min(rect.width / 2.0).min(rect.height / 2.0);
        if w <= 0.0 {
            return;
        }
        let inner_height = rect.height - 2.0 * w;
        for band in [
            Rect::new(rect.x, rect.y, rect.width, w),
            Rect::new(rect.x, rect.bottom() - w, rect.width, w),
            Rect::new(rect.x, rect.y + w, w, inner_height),
            Rect::new(rect.right() - w, rect.y + w, w, inner_height),
        ] {
            self.fill_rect(pixmap, band, color);
        }
    }

    /// Returns `false` when no face could outline the run.
    fn draw_text(&self, pixmap: &mut Pixmap, frame: Rect, run: &TextRun, color: Color) -> bool {
        let path = self.fonts.with_face(run.weight, |face| text_path(face, frame, run));
        match path {
            None => false,
            Some(path) => {
                if let Some(path) = path {
                    pixmap.fill_path(&path, &solid(color), FillRule::Winding, self.base, None);
                }
                true
            }
        }
    }

    fn draw_image(&self, pixmap: &mut Pixmap, frame: Rect, image: &RasterImage) {
        if image.is_empty() || frame.is_empty() {
            return;
        }
        let Some(source) = image.to_pixmap() else {
            return;
        };
        let sx = frame.width / image.width() as f32;
        let sy = frame.height / image.height() as f32;
        let placement = Transform::from_row(sx, 0.0, 0.0, sy, frame.x, frame.y);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, self.base.pre_concat(placement), None);
    }
}

/// All glyph outlines of `run` as a single path in tree coordinates.
fn text_path(face: &ttf_parser::Face<'_>, frame: Rect, run: &TextRun) -> Option<tiny_skia::Path> {
    let scale = run.font_size / face.units_per_em() as f32;
    let ascent = face.ascender() as f32 * scale;
    let descent = -(face.descender() as f32) * scale;
    let leading = (run.line_height - (ascent + descent)) / 2.0;

    let mut builder = PathBuilder::new();
    for (index, line) in run.lines.iter().enumerate() {
        let baseline = frame.y + index as f32 * run.line_height + leading + ascent;
        let mut pen_x = frame.x;
        for c in line.chars() {
            let glyph = face.glyph_index(c);
            if let Some(glyph) = glyph {
                let mut outline = GlyphOutline {
                    builder: &mut builder,
                    origin_x: pen_x,
                    baseline,
                    scale,
                };
                face.outline_glyph(glyph, &mut outline);
            }
            pen_x += glyph
                .and_then(|glyph| face.glyph_hor_advance(glyph))
                .map(|advance| advance as f32 * scale)
                .unwrap_or(run.font_size * FALLBACK_ADVANCE_EM);
        }
    }
    builder.finish()
}

/// Feeds font-unit outlines into a path, flipping y to screen orientation.
struct GlyphOutline<'a> {
    builder: &'a mut PathBuilder,
    origin_x: f32,
    baseline: f32,
    scale: f32,
}

impl GlyphOutline<'_> {
    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.baseline - y * self.scale)
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutline<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

fn to_skia(color: Color) -> tiny_skia::Color {
    let alpha = (color.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use srsforge_style::FontWeight;
    use srsforge_visual::ComputedStyle;

    fn painter<'a>(fonts: &'a FontBook, images: &'a HashMap<ResourceUri, RasterImage>) -> Painter<'a> {
        Painter {
            fonts,
            images,
            base: Transform::identity(),
        }
    }

    #[test]
    fn unsupported_color_fails_with_node_and_channel() {
        let node = VisualNode::block(Rect::new(0.0, 0.0, 10.0, 10.0), ComputedStyle::default())
            .with_child(
                VisualNode::block(
                    Rect::new(0.0, 0.0, 5.0, 5.0),
                    ComputedStyle::default().with_background("color-mix(in srgb, red, blue)"),
                )
                .with_id("panel"),
            );
        match DisplayList::build(&node) {
            Err(CaptureError::UnsupportedColor { node, channel, function, .. }) => {
                assert_eq!(node, "panel");
                assert_eq!(channel, StyleChannel::BackgroundColor);
                assert_eq!(function, "color-mix");
            }
            other => panic!("expected UnsupportedColor, got {other:?}"),
        }
    }

    #[test]
    fn text_color_is_inherited_and_invalid_values_are_skipped() {
        let run = TextRun {
            lines: vec!["hi".into()],
            font_size: 10.0,
            weight: FontWeight::Regular,
            line_height: 14.0,
        };
        let node = VisualNode::block(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            ComputedStyle::default().with_color("#00f").with_background("var(--x)"),
        )
        .with_child(VisualNode::text(Rect::new(0.0, 0.0, 10.0, 10.0), ComputedStyle::default(), run));

        let list = DisplayList::build(&node).unwrap();
        assert_eq!(list.ops.len(), 1);
        assert!(matches!(list.ops[0], PaintOp::Text { color, .. } if color == Color::rgb(0, 0, 255)));
    }

    #[test]
    fn paints_background_and_border() {
        let node = VisualNode::block(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            ComputedStyle::default().with_background("rgb(255, 0, 0)").with_border(2.0, "#000"),
        );
        let list = DisplayList::build(&node).unwrap();
        let (fonts, images) = (FontBook::empty(), HashMap::new());
        let (image, stats) = painter(&fonts, &images).paint(&list, 10, 10, Some(Color::WHITE)).unwrap();

        assert_eq!(stats.skipped_text_runs, 0);
        assert_eq!(image.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(image.pixel(5, 5), Some(Color::rgb(255, 0, 0)));
        assert_eq!(image.pixel(9, 5), Some(Color::BLACK));
    }

    #[test]
    fn text_without_fonts_is_counted_as_skipped() {
        let run = TextRun {
            lines: vec!["hello".into()],
            font_size: 12.0,
            weight: FontWeight::Bold,
            line_height: 16.0,
        };
        let node = VisualNode::text(Rect::new(0.0, 0.0, 40.0, 16.0), ComputedStyle::default(), run);
        let list = DisplayList::build(&node).unwrap();
        let (fonts, images) = (FontBook::empty(), HashMap::new());
        let (image, stats) = painter(&fonts, &images).paint(&list, 40, 16, Some(Color::WHITE)).unwrap();
        assert_eq!(stats.skipped_text_runs, 1);
        assert_eq!(image.pixel(3, 8), Some(Color::WHITE));
    }

    #[test]
    fn images_are_scaled_into_their_frame() {
        let source = ResourceUri::new("dot.png");
        let node = VisualNode::image(Rect::new(2.0, 2.0, 4.0, 4.0), source.clone())
            .with_child(VisualNode::image(Rect::new(0.0, 0.0, 1.0, 1.0), source.clone()));
        let list = DisplayList::build(&node).unwrap();
        assert_eq!(list.image_sources(), vec![source.clone()]);

        let mut images = HashMap::new();
        images.insert(source, RasterImage::filled(1, 1, Color::rgb(0, 128, 0)));
        let fonts = FontBook::empty();
        let (image, _) = painter(&fonts, &images).paint(&list, 8, 8, None).unwrap();
        let center = image.pixel(4, 4).unwrap();
        assert_eq!((center.r, center.b, center.a), (0, 0, 1.0));
        assert!((126..=130).contains(&center.g), "{center:?}");
        assert_eq!(image.pixel(7, 7).map(|c| c.a), Some(0.0));
    }
}
