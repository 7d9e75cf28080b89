//! Mapped element types and the bidirectional type registry.
//!
//! The generic parser speaks [`MarkdownKind`]; the target tree speaks
//! [`ElementType`], a dense id that doubles as the rowan raw kind. The
//! [`ElementTypeRegistry`] owns the bijection between the two, minting an
//! `ElementType` the first time a kind is seen and classifying it on the way.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use markdown_lattice_syntax::MarkdownKind;

/// A registry-assigned element type id. Doubles as the rowan raw kind of the
/// target tree, so a [`SyntaxNode`]'s kind can be handed straight back to the
/// registry that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementType(pub(crate) u16);

impl ElementType {
    pub fn raw(self) -> u16 {
        self.0
    }
}

/// How an element type behaves beyond plain tree structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCategory {
    /// Ordinary structural node or token.
    Plain,
    /// Content holder whose inline structure is parsed on demand.
    LazyContainer,
    /// Heading node that participates in the headers index.
    HeaderIndexable,
}

struct Entry {
    kind: MarkdownKind,
    category: ElementCategory,
    name: String,
}

struct RegistryInner {
    forward: HashMap<MarkdownKind, ElementType>,
    // indexed by ElementType id; ids are minted densely from zero
    entries: Vec<Entry>,
}

/// Bidirectional, append-only mapping between [`MarkdownKind`] and
/// [`ElementType`].
///
/// Both directions are updated atomically under one mutex; the type
/// vocabulary is small and fixed by the grammar, so a coarse lock costs
/// nothing. The registry is an explicit object, shared via `Arc` by whoever
/// needs type translation; two registries mint independent id spaces, and an
/// id from one registry is a foreign type to the other.
pub struct ElementTypeRegistry {
    inner: Mutex<RegistryInner>,
}

impl ElementTypeRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                forward: HashMap::new(),
                entries: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The element type for a generic kind, minting one on first encounter.
    /// Total: every kind maps to exactly one element type for the lifetime of
    /// the registry.
    pub fn element_type(&self, kind: MarkdownKind) -> ElementType {
        let mut inner = self.lock();
        if let Some(&existing) = inner.forward.get(&kind) {
            return existing;
        }
        let id = ElementType(inner.entries.len() as u16);
        inner.entries.push(Entry {
            kind,
            category: classify(kind),
            name: format!("Markdown:{kind:?}"),
        });
        inner.forward.insert(kind, id);
        id
    }

    /// Reverse lookup. `None` for element types this registry never minted.
    pub fn markdown_kind(&self, element: ElementType) -> Option<MarkdownKind> {
        self.lock().entries.get(element.0 as usize).map(|e| e.kind)
    }

    /// The category recorded when the element type was minted.
    pub fn category(&self, element: ElementType) -> Option<ElementCategory> {
        self.lock()
            .entries
            .get(element.0 as usize)
            .map(|e| e.category)
    }

    /// Debug name of a minted element type.
    pub fn name(&self, element: ElementType) -> Option<String> {
        self.lock()
            .entries
            .get(element.0 as usize)
            .map(|e| e.name.clone())
    }

    pub fn is_lazy_container(&self, element: ElementType) -> bool {
        self.category(element) == Some(ElementCategory::LazyContainer)
    }

    pub fn is_header(&self, element: ElementType) -> bool {
        self.category(element) == Some(ElementCategory::HeaderIndexable)
    }
}

impl Default for ElementTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(kind: MarkdownKind) -> ElementCategory {
    use MarkdownKind::*;
    match kind {
        PARAGRAPH | ATX_CONTENT | SETEXT_CONTENT | TABLE_CELL => ElementCategory::LazyContainer,
        ATX_1 | ATX_2 | ATX_3 | ATX_4 | ATX_5 | ATX_6 | SETEXT_1 | SETEXT_2 => {
            ElementCategory::HeaderIndexable
        }
        _ => ElementCategory::Plain,
    }
}

/// The rowan language of the target tree. Raw kinds are [`ElementType`] ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LatticeLang {}

impl rowan::Language for LatticeLang {
    type Kind = ElementType;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        ElementType(raw.0)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind.0)
    }
}

/// Type alias for target tree nodes.
pub type SyntaxNode = rowan::SyntaxNode<LatticeLang>;
/// Type alias for target tree tokens.
pub type SyntaxToken = rowan::SyntaxToken<LatticeLang>;
/// Type alias for target tree elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<LatticeLang>;
