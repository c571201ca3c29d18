//! The rendered visual tree handed to the sanitizer and the rasterizer.
//!
//! Frames are absolute, in CSS pixels, measured from the tree origin. A node's
//! frame need not contain its children; overflow is what `scroll_extent` measures.

use crate::style::ComputedStyle;
use srsforge_style::FontWeight;
use srsforge_types::{NodeId, Rect, ResourceUri, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A plain box: background and border only.
    Block,
    /// Pre-wrapped text; line `i` occupies `[i * line_height, (i + 1) * line_height)`
    /// below the frame top.
    Text(TextRun),
    /// An embedded raster image scaled to fill the frame.
    Image { source: ResourceUri },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub lines: Vec<String>,
    pub font_size: f32,
    pub weight: FontWeight,
    pub line_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualNode {
    pub id: Option<NodeId>,
    pub kind: NodeKind,
    pub frame: Rect,
    pub style: ComputedStyle,
    pub children: Vec<VisualNode>,
}

impl VisualNode {
    pub fn block(frame: Rect, style: ComputedStyle) -> Self {
        Self {
            id: None,
            kind: NodeKind::Block,
            frame,
            style,
            children: Vec::new(),
        }
    }

    pub fn text(frame: Rect, style: ComputedStyle, run: TextRun) -> Self {
        Self {
            kind: NodeKind::Text(run),
            ..Self::block(frame, style)
        }
    }

    pub fn image(frame: Rect, source: impl Into<ResourceUri>) -> Self {
        Self {
            kind: NodeKind::Image { source: source.into() },
            ..Self::block(frame, ComputedStyle::default())
        }
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_child(mut self, child: VisualNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search for the node carrying `id`, including `self`.
    pub fn find(&self, id: &NodeId) -> Option<&VisualNode> {
        if self.id.as_ref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut VisualNode> {
        if self.id.as_ref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Pre-order iterator over this node and all descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    pub fn node_count(&self) -> usize {
        self.descendants().count()
    }

    /// Union of this node's frame and every descendant frame.
    pub fn content_bounds(&self) -> Rect {
        self.descendants()
            .skip(1)
            .fold(self.frame, |bounds, node| bounds.union(&node.frame))
    }

    /// The full scrollable size measured from this node's top-left corner,
    /// not just its visible frame.
    pub fn scroll_extent(&self) -> Size {
        let bounds = self.content_bounds();
        Size::new(
            (bounds.right() - self.frame.x).max(0.0),
            (bounds.bottom() - self.frame.y).max(0.0),
        )
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a VisualNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a VisualNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// An owned visual tree, as produced by the preview renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualTree {
    root: VisualNode,
}

impl VisualTree {
    pub fn new(root: VisualNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &VisualNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut VisualNode {
        &mut self.root
    }

    pub fn find(&self, id: &NodeId) -> Option<&VisualNode> {
        self.root.find(id)
    }

    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut VisualNode> {
        self.root.find_mut(id)
    }

    pub fn into_root(self) -> VisualNode {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VisualNode {
        VisualNode::block(Rect::new(10.0, 10.0, 100.0, 50.0), ComputedStyle::default())
            .with_id("outer")
            .with_child(
                VisualNode::block(Rect::new(10.0, 40.0, 100.0, 200.0), ComputedStyle::default())
                    .with_id("inner")
                    .with_child(VisualNode::image(Rect::new(20.0, 220.0, 130.0, 30.0), "logo.png")),
            )
    }

    #[test]
    fn scroll_extent_covers_overflow() {
        let node = sample();
        // right edge 150 - 10, bottom edge 250 - 10
        assert_eq!(node.scroll_extent(), Size::new(140.0, 240.0));
        assert_eq!(node.frame.height, 50.0);
    }

    #[test]
    fn find_by_id() {
        let mut node = sample();
        assert!(node.find(&NodeId::new("inner")).is_some());
        assert!(node.find(&NodeId::new("missing")).is_none());

        let inner = node.find_mut(&NodeId::new("inner")).unwrap();
        inner.children.clear();
        assert_eq!(node.node_count(), 2);
    }

    #[test]
    fn descendants_are_pre_order() {
        let node = sample();
        let kinds: Vec<bool> = node
            .descendants()
            .map(|n| matches!(n.kind, NodeKind::Image { .. }))
            .collect();
        assert_eq!(kinds, vec![false, false, true]);
    }
}
