//! Flat lexeme stream over a parsed document.
//!
//! Token-oriented consumers (highlighting, simple indexing) want a
//! conventional lexer cursor, not a tree. The stream parses through the
//! cache, flattens the generic AST to its leaves, and exposes a restartable
//! cursor whose resumption state is just an index.

use std::ops::Range;
use std::sync::Arc;

use markdown_lattice_syntax::{Flavour, MarkdownKind};

use crate::cache::ParseCache;
use crate::element::{ElementType, ElementTypeRegistry};

/// One flat lexeme: the generic kind, its mapped element type, and its span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: MarkdownKind,
    pub element: ElementType,
    pub range: Range<usize>,
}

/// Cursor over the leaf lexemes of a document, in text order.
///
/// The whole lexeme list is computed eagerly at construction; zero-length
/// leaves are dropped. Composite nodes are recursed into, never emitted.
pub struct TokenStream {
    lexemes: Vec<Lexeme>,
    index: usize,
}

impl TokenStream {
    pub fn new(
        cache: &ParseCache,
        registry: &Arc<ElementTypeRegistry>,
        flavour: &Flavour,
        text: &str,
    ) -> Self {
        let ast = cache.parse(text, flavour);
        let lexemes = ast
            .descendants()
            .filter(|node| node.is_leaf() && !node.range().is_empty())
            .map(|node| Lexeme {
                kind: node.kind(),
                element: registry.element_type(node.kind()),
                range: node.range(),
            })
            .collect();
        Self { lexemes, index: 0 }
    }

    pub fn current(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.index)
    }

    pub fn token_type(&self) -> Option<ElementType> {
        self.current().map(|l| l.element)
    }

    pub fn token_start(&self) -> Option<usize> {
        self.current().map(|l| l.range.start)
    }

    pub fn token_end(&self) -> Option<usize> {
        self.current().map(|l| l.range.end)
    }

    pub fn advance(&mut self) {
        if self.index < self.lexemes.len() {
            self.index += 1;
        }
    }

    /// Resumption state: the index into the precomputed lexeme list.
    pub fn state(&self) -> usize {
        self.index
    }

    /// Restart the cursor at a previously observed state.
    pub fn restore(&mut self, state: usize) {
        debug_assert!(state <= self.lexemes.len());
        self.index = state.min(self.lexemes.len());
    }

    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }
}

impl Iterator for TokenStream {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        let lexeme = self.current().cloned()?;
        self.advance();
        Some(lexeme)
    }
}
