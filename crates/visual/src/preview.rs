//! Lays an expanded SRS out as a single-column visual tree.
//!
//! Layout is a simple vertical flow: each block takes the full content width,
//! text wraps on word boundaries using the font book, and blocks stack with
//! fixed spacing. The root carries the capture target id.

use crate::fonts::FontBook;
use crate::style::ComputedStyle;
use crate::tree::{TextRun, VisualNode, VisualTree};
use srsforge_document::ExpandedDocument;
use srsforge_style::FontWeight;
use srsforge_types::{NodeId, Rect};
use std::sync::Arc;

/// Id of the node the local export path captures.
pub const CAPTURE_TARGET_ID: &str = "srs-preview";

/// Width of an A4 sheet at 96 dpi.
pub const DEFAULT_PREVIEW_WIDTH: f32 = 794.0;

const LINE_HEIGHT_FACTOR: f32 = 1.45;

/// Color values for each role in the preview, as raw CSS strings.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTheme {
    pub background: String,
    pub text: String,
    pub heading: String,
    pub muted: String,
    pub frame: String,
    pub rule: String,
}

impl Default for PreviewTheme {
    /// The on-screen palette, expressed in `oklch()` like modern utility CSS.
    fn default() -> Self {
        Self {
            background: "oklch(0.985 0.002 247.839)".into(),
            text: "oklch(0.21 0.034 264.665)".into(),
            heading: "oklch(0.379 0.146 265.522)".into(),
            muted: "oklch(0.446 0.03 256.802)".into(),
            frame: "oklch(0.279 0.041 260.031)".into(),
            rule: "oklch(0.872 0.01 258.338)".into(),
        }
    }
}

impl PreviewTheme {
    /// An sRGB-only palette that needs no sanitizing.
    pub fn print() -> Self {
        Self {
            background: "#ffffff".into(),
            text: "rgb(17, 24, 39)".into(),
            heading: "rgb(30, 58, 138)".into(),
            muted: "rgb(75, 85, 99)".into(),
            frame: "rgb(30, 41, 59)".into(),
            rule: "rgb(209, 213, 219)".into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TextRole {
    Title,
    ProjectName,
    SectionHeading,
    SubHeading,
    Body,
    Caption,
}

impl TextRole {
    fn font_size(self) -> f32 {
        match self {
            TextRole::Title => 26.0,
            TextRole::ProjectName => 20.0,
            TextRole::SectionHeading => 18.0,
            TextRole::SubHeading => 15.0,
            TextRole::Body => 13.0,
            TextRole::Caption => 12.0,
        }
    }

    fn weight(self) -> FontWeight {
        match self {
            TextRole::Title | TextRole::ProjectName | TextRole::SectionHeading => FontWeight::Bold,
            TextRole::SubHeading => FontWeight::Medium,
            TextRole::Body | TextRole::Caption => FontWeight::Regular,
        }
    }

    fn space_after(self) -> f32 {
        match self {
            TextRole::Title => 10.0,
            TextRole::ProjectName => 8.0,
            TextRole::SectionHeading => 6.0,
            TextRole::SubHeading => 4.0,
            TextRole::Body | TextRole::Caption => 8.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    fonts: Arc<FontBook>,
    theme: PreviewTheme,
    width: f32,
    padding: f32,
    frame_width: f32,
}

impl PreviewRenderer {
    pub fn new(fonts: Arc<FontBook>) -> Self {
        Self {
            fonts,
            theme: PreviewTheme::default(),
            width: DEFAULT_PREVIEW_WIDTH,
            padding: 40.0,
            frame_width: 3.0,
        }
    }

    pub fn with_theme(mut self, theme: PreviewTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width.max(1.0);
        self
    }

    pub fn theme(&self) -> &PreviewTheme {
        &self.theme
    }

    pub fn render(&self, doc: &ExpandedDocument) -> VisualTree {
        let mut flow = Flow::new(self);

        let cover = doc.cover();
        flow.text(cover.title(), TextRole::Title, &self.theme.heading);
        flow.text(cover.project_name(), TextRole::ProjectName, &self.theme.text);
        flow.text(cover.description(), TextRole::Body, &self.theme.text);
        flow.text(&format!("Team Members: {}", cover.members().join(", ")), TextRole::Caption, &self.theme.muted);
        flow.text(&format!("Date: {}", cover.display_date()), TextRole::Caption, &self.theme.muted);
        flow.rule();

        let intro = doc.introduction();
        flow.text("1. Introduction", TextRole::SectionHeading, &self.theme.heading);
        flow.labeled("1.1 Purpose", intro.purpose());
        flow.labeled("1.2 Scope", intro.scope());
        flow.text("1.3 Definitions, Acronyms, and Abbreviations", TextRole::SubHeading, &self.theme.heading);
        for definition in intro.definitions() {
            flow.text(
                &format!("• {}: {}", definition.term(), definition.meaning()),
                TextRole::Body,
                &self.theme.text,
            );
        }
        flow.labeled("1.4 References", intro.references());
        flow.rule();

        let general = doc.general_description();
        flow.text("2. General Description", TextRole::SectionHeading, &self.theme.heading);
        flow.labeled("2.1 Product Perspective", general.product_perspective());
        flow.labeled("2.2 Product Functions", general.product_functions());
        flow.labeled("2.3 User Characteristics", general.user_characteristics());
        flow.labeled("2.4 General Constraints", general.general_constraints());
        flow.labeled("2.5 Assumptions and Dependencies", general.assumptions_dependencies());
        flow.rule();

        let specific = doc.specific_requirements();
        flow.text("3. Specific Requirements", TextRole::SectionHeading, &self.theme.heading);
        flow.text("3.1 Functional Requirements", TextRole::SubHeading, &self.theme.heading);
        for requirement in specific.functional_requirements() {
            flow.text(requirement, TextRole::Body, &self.theme.text);
        }
        flow.labeled("3.2 External Interface Requirements", specific.external_interface_requirements());
        flow.text("3.3 Non-Functional Requirements", TextRole::SubHeading, &self.theme.heading);
        for requirement in specific.non_functional_requirements() {
            flow.text(requirement, TextRole::Body, &self.theme.text);
        }

        let tree = flow.finish();
        log::debug!(
            "Preview laid out: {} node(s), {:.0}x{:.0}px",
            tree.root().node_count(),
            tree.root().frame.width,
            tree.root().frame.height
        );
        tree
    }
}

/// Vertical block flow inside the framed root.
struct Flow<'a> {
    renderer: &'a PreviewRenderer,
    cursor_y: f32,
    children: Vec<VisualNode>,
}

impl<'a> Flow<'a> {
    fn new(renderer: &'a PreviewRenderer) -> Self {
        Self {
            renderer,
            cursor_y: renderer.padding,
            children: Vec::new(),
        }
    }

    fn content_x(&self) -> f32 {
        self.renderer.padding
    }

    fn content_width(&self) -> f32 {
        (self.renderer.width - 2.0 * self.renderer.padding).max(1.0)
    }

    fn text(&mut self, text: &str, role: TextRole, color: &str) {
        let font_size = role.font_size();
        let weight = role.weight();
        let lines = self
            .renderer
            .fonts
            .wrap(text, font_size, weight, self.content_width());
        if lines.is_empty() {
            return;
        }
        let line_height = (font_size * LINE_HEIGHT_FACTOR).round();
        let height = line_height * lines.len() as f32;
        let frame = Rect::new(self.content_x(), self.cursor_y, self.content_width(), height);
        self.children.push(VisualNode::text(
            frame,
            ComputedStyle::default().with_color(color),
            TextRun {
                lines,
                font_size,
                weight,
                line_height,
            },
        ));
        self.cursor_y += height + role.space_after();
    }

    fn labeled(&mut self, heading: &str, body: &str) {
        let theme = &self.renderer.theme;
        let (heading_color, body_color) = (theme.heading.clone(), theme.text.clone());
        self.text(heading, TextRole::SubHeading, &heading_color);
        self.text(body, TextRole::Body, &body_color);
    }

    fn rule(&mut self) {
        self.cursor_y += 6.0;
        let frame = Rect::new(self.content_x(), self.cursor_y, self.content_width(), 1.0);
        self.children.push(VisualNode::block(
            frame,
            ComputedStyle::default().with_background(self.renderer.theme.rule.clone()),
        ));
        self.cursor_y += 1.0 + 14.0;
    }

    fn finish(self) -> VisualTree {
        let theme = &self.renderer.theme;
        let height = self.cursor_y + self.renderer.padding;
        let mut root = VisualNode::block(
            Rect::new(0.0, 0.0, self.renderer.width, height),
            ComputedStyle::default()
                .with_color(theme.text.clone())
                .with_background(theme.background.clone())
                .with_border(self.renderer.frame_width, theme.frame.clone()),
        )
        .with_id(NodeId::new(CAPTURE_TARGET_ID));
        root.children = self.children;
        VisualTree::new(root)
    }
}
