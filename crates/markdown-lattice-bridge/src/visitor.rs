//! Replaying a generic AST into the marker-based tree builder.

use std::sync::Arc;

use markdown_lattice_syntax::{MarkdownKind, MarkdownNode};

use crate::builder::TreeBuilder;
use crate::element::ElementTypeRegistry;
use crate::error::SyncError;

/// Depth-first replay of a [`MarkdownNode`] tree into a [`TreeBuilder`].
///
/// Composite nodes become markers; leaves are skipped, their text reaching
/// the tree through the builder's own token stream as the cursor advances
/// across them. Two leaf kinds are retained as nodes of their own: link
/// definition labels and destinations, which are tokenized independently of
/// normal inline parsing and keep their identity even as leaves.
///
/// Every marker close is offset-checked against the AST. The cursor moving
/// past a declared boundary is a fatal [`SyncError`].
pub struct TreeFillingVisitor {
    registry: Arc<ElementTypeRegistry>,
}

impl TreeFillingVisitor {
    pub fn new(registry: Arc<ElementTypeRegistry>) -> Self {
        Self { registry }
    }

    /// Replay `node` and its whole subtree into the builder.
    pub fn fill(&self, builder: &mut TreeBuilder<'_>, node: &MarkdownNode) -> Result<(), SyncError> {
        // the leaf test is by kind, not by child count: a composite with no
        // children (an empty document) still opens and closes its marker
        if node.kind().is_token() && !retained_as_node(node.kind()) {
            return Ok(());
        }
        self.ensure_position(builder, node.start(), node.kind())?;
        let marker = builder.mark();
        for child in node.children() {
            self.fill(builder, child)?;
        }
        self.ensure_position(builder, node.end(), node.kind())?;
        builder.done(marker, self.registry.element_type(node.kind()));
        Ok(())
    }

    /// Advance the cursor forward to exactly `target`. Overshoot means the
    /// builder's token stream and the AST disagree about the text.
    fn ensure_position(
        &self,
        builder: &mut TreeBuilder<'_>,
        target: usize,
        kind: MarkdownKind,
    ) -> Result<(), SyncError> {
        while builder.current_offset() < target && !builder.eof() {
            builder.advance_lexer();
        }
        if builder.current_offset() != target {
            return Err(SyncError {
                expected: target,
                actual: builder.current_offset(),
                context: format!("{kind:?}"),
            });
        }
        Ok(())
    }
}

fn retained_as_node(kind: MarkdownKind) -> bool {
    matches!(kind, MarkdownKind::LINK_LABEL | MarkdownKind::LINK_DESTINATION)
}
