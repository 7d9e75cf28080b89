//! Marker-based tree builder over a lexer-synchronized token cursor.
//!
//! The builder owns its own token stream, lexed independently of whatever
//! AST is being replayed into it. That independence is the point: the
//! [`TreeFillingVisitor`](crate::visitor::TreeFillingVisitor) must reconcile
//! the two by offset, and a mismatch surfaces as a
//! [`SyncError`](crate::error::SyncError) instead of a corrupt tree.
//!
//! Markers are rowan checkpoints: [`mark`](TreeBuilder::mark) before the
//! node's tokens, [`done`](TreeBuilder::done) after, and the tokens consumed
//! in between become the node's children. The cursor only moves forward.

use std::ops::Range;
use std::sync::Arc;

use markdown_lattice_syntax::lexer::{lex, Token};
use rowan::{Checkpoint, GreenNodeBuilder, Language};

use crate::element::{ElementType, ElementTypeRegistry, LatticeLang, SyntaxNode};

/// An open node boundary. Every marker must be closed with
/// [`TreeBuilder::done`] before the builder is finished.
#[must_use = "an unclosed marker leaves the tree unbalanced"]
pub struct Marker {
    checkpoint: Checkpoint,
}

/// Incremental target-tree builder with a forward-only token cursor.
pub struct TreeBuilder<'a> {
    builder: GreenNodeBuilder<'static>,
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    // offset reported once every token is consumed
    end: usize,
    registry: Arc<ElementTypeRegistry>,
}

impl<'a> TreeBuilder<'a> {
    /// A builder positioned at offset 0 over the whole text.
    pub fn new(text: &'a str, registry: Arc<ElementTypeRegistry>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens: lex(text),
            text,
            pos: 0,
            end: text.len(),
            registry,
        }
    }

    /// A builder over one span of the text, positioned at the span's start.
    /// Used for lazy inline expansion, where the replayed AST carries offsets
    /// relative to the whole buffer.
    pub fn for_span(text: &'a str, span: Range<usize>, registry: Arc<ElementTypeRegistry>) -> Self {
        let mut tokens = lex(&text[span.clone()]);
        for token in &mut tokens {
            token.range = token.range.start + span.start..token.range.end + span.start;
        }
        Self {
            builder: GreenNodeBuilder::new(),
            tokens,
            text,
            pos: 0,
            end: span.end,
            registry,
        }
    }

    /// Byte offset of the cursor: the start of the next unconsumed token, or
    /// the end of the span once everything is consumed.
    pub fn current_offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|t| t.range.start)
            .unwrap_or(self.end)
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consume one token into the tree at the current structural position.
    pub fn advance_lexer(&mut self) {
        debug_assert!(!self.eof(), "advance past end of token stream");
        let token = &self.tokens[self.pos];
        let element = self.registry.element_type(token.kind);
        self.builder
            .token(LatticeLang::kind_to_raw(element), token.text(self.text));
        self.pos += 1;
    }

    /// Open a node boundary at the current position.
    pub fn mark(&mut self) -> Marker {
        Marker {
            checkpoint: self.builder.checkpoint(),
        }
    }

    /// Close a boundary, wrapping everything consumed since [`mark`] into a
    /// node of the given element type. Nested markers close innermost-first.
    pub fn done(&mut self, marker: Marker, element: ElementType) {
        self.builder
            .start_node_at(marker.checkpoint, LatticeLang::kind_to_raw(element));
        self.builder.finish_node();
    }

    /// Finish the tree. All markers must be closed and, for a well-formed
    /// replay, the cursor sits at the end of the span.
    pub fn finish(self) -> SyntaxNode {
        SyntaxNode::new_root(self.builder.finish())
    }
}
