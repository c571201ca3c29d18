use crate::error::PreconditionError;
use chrono::NaiveDate;
use srsforge_document::{ExpandedDocument, RawInput, expand, expand_on};
use srsforge_visual::{PreviewRenderer, VisualTree};

/// The single active document: its input, the expansion and the rendered preview.
///
/// Each stage is derived from the one before it, so regenerating drops the
/// now stale preview.
#[derive(Debug, Clone, Default)]
pub struct Session {
    input: RawInput,
    document: Option<ExpandedDocument>,
    preview: Option<VisualTree>,
}

impl Session {
    pub fn new(input: RawInput) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &RawInput {
        &self.input
    }

    /// Editing the input does not touch an already generated document.
    pub fn input_mut(&mut self) -> &mut RawInput {
        &mut self.input
    }

    pub fn generate(&mut self) -> &ExpandedDocument {
        let document = expand(&self.input);
        self.install(document)
    }

    pub fn generate_on(&mut self, date: NaiveDate) -> &ExpandedDocument {
        let document = expand_on(&self.input, date);
        self.install(document)
    }

    fn install(&mut self, document: ExpandedDocument) -> &ExpandedDocument {
        self.preview = None;
        self.document.insert(document)
    }

    pub fn document(&self) -> Option<&ExpandedDocument> {
        self.document.as_ref()
    }

    pub fn is_generated(&self) -> bool {
        self.document.is_some()
    }

    /// Lays the generated document out with `renderer`, replacing any earlier preview.
    pub fn preview(&mut self, renderer: &PreviewRenderer) -> Result<&VisualTree, PreconditionError> {
        let document = self.document.as_ref().ok_or(PreconditionError::NotExpanded)?;
        let tree = renderer.render(document);
        Ok(self.preview.insert(tree))
    }

    /// Installs a tree produced by some other presentation layer.
    pub fn set_preview(&mut self, tree: VisualTree) {
        self.preview = Some(tree);
    }

    pub fn visual_tree(&self) -> Option<&VisualTree> {
        self.preview.as_ref()
    }

    pub fn visual_tree_mut(&mut self) -> Option<&mut VisualTree> {
        self.preview.as_mut()
    }

    /// Back to an empty form with nothing generated.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
