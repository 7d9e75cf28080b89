//! Lazy inline expansion of content-holder nodes.
//!
//! The block pass leaves paragraphs, heading contents and table cells as
//! containers of raw tokens. Their inline structure is produced here, on
//! first demand, by re-running the generic parser in inline-only mode over
//! exactly the container's span and replaying the result through the
//! tree-filling visitor.
//!
//! Expansion is a pure function of (span, kind, flavour): expanding the same
//! container twice gives structurally identical subtrees, and a memoized
//! [`LazyInline`] never expands twice at all.

use std::cell::OnceCell;
use std::ops::Range;
use std::sync::Arc;

use markdown_lattice_syntax::{parse_inline, Flavour, MarkdownKind};

use crate::builder::TreeBuilder;
use crate::document::Document;
use crate::element::{ElementTypeRegistry, SyntaxNode};
use crate::error::SyncError;

/// Expand the inline structure of one container span into a target subtree.
///
/// `flavour` is the one recorded against the owning document. `None` means
/// the association was never set up; that is a setup bug upstream, so the
/// fallback to the default flavour is logged at error severity, but the
/// expansion still produces a result.
pub fn expand_inline(
    registry: &Arc<ElementTypeRegistry>,
    flavour: Option<Flavour>,
    kind: MarkdownKind,
    text: &str,
    span: Range<usize>,
) -> Result<SyntaxNode, SyncError> {
    let flavour = flavour.unwrap_or_else(|| {
        log::error!(
            "no flavour recorded for lazy container {kind:?} at {}..{}; \
             falling back to the default flavour",
            span.start,
            span.end
        );
        Flavour::default()
    });
    let ast = parse_inline(&flavour, kind, text, span.start, span.end);
    let mut builder = TreeBuilder::for_span(text, span, Arc::clone(registry));
    let visitor = crate::visitor::TreeFillingVisitor::new(Arc::clone(registry));
    visitor.fill(&mut builder, &ast)?;
    Ok(builder.finish())
}

/// A lazy container in its explicit two-state form: the unexpanded
/// description (kind, span, recorded flavour) plus the memoized expansion.
pub struct LazyInline {
    kind: MarkdownKind,
    span: Range<usize>,
    flavour: Option<Flavour>,
    expanded: OnceCell<SyntaxNode>,
}

impl LazyInline {
    /// Wrap a lazy-container node of a document's tree. Returns `None` for
    /// nodes that are not lazy containers, or whose element type is foreign
    /// to the registry.
    pub fn for_node(
        registry: &ElementTypeRegistry,
        document: &Document,
        node: &SyntaxNode,
    ) -> Option<Self> {
        if !registry.is_lazy_container(node.kind()) {
            return None;
        }
        let kind = registry.markdown_kind(node.kind())?;
        let range = node.text_range();
        Some(Self {
            kind,
            span: usize::from(range.start())..usize::from(range.end()),
            flavour: document.flavour().copied(),
            expanded: OnceCell::new(),
        })
    }

    pub fn kind(&self) -> MarkdownKind {
        self.kind
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The memoized expansion, if it has happened.
    pub fn expanded(&self) -> Option<&SyntaxNode> {
        self.expanded.get()
    }

    /// Expand on first call, then return the memoized subtree forever after.
    pub fn get_or_expand(
        &self,
        registry: &Arc<ElementTypeRegistry>,
        text: &str,
    ) -> Result<&SyntaxNode, SyncError> {
        if let Some(node) = self.expanded.get() {
            return Ok(node);
        }
        let node = expand_inline(registry, self.flavour, self.kind, text, self.span())?;
        Ok(self.expanded.get_or_init(|| node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ParseCache;
    use crate::document::DocumentParser;
    use pretty_assertions::assert_eq;

    fn setup(text: &str, flavour: Option<Flavour>) -> (Arc<ElementTypeRegistry>, Document) {
        let registry = Arc::new(ElementTypeRegistry::new());
        let parser = DocumentParser::new(Arc::clone(&registry));
        let cache = ParseCache::new();
        let document = Document::parse(&parser, &cache, text.to_owned(), flavour).unwrap();
        (registry, document)
    }

    fn first_lazy_container(
        registry: &ElementTypeRegistry,
        document: &Document,
    ) -> LazyInline {
        document
            .tree()
            .descendants()
            .find_map(|node| LazyInline::for_node(registry, document, &node))
            .expect("document has a lazy container")
    }

    #[test]
    fn heading_content_expands_to_a_text_lexeme() {
        let text = "# Hello";
        let (registry, document) = setup(text, Some(Flavour::gfm()));
        let lazy = first_lazy_container(&registry, &document);
        assert_eq!(lazy.kind(), MarkdownKind::ATX_CONTENT);
        assert_eq!(lazy.span(), 2..7);
        let subtree = lazy.get_or_expand(&registry, text).unwrap();
        assert_eq!(subtree.text().to_string(), "Hello");
        assert_eq!(subtree.children().count(), 0);
        assert_eq!(subtree.children_with_tokens().count(), 1);
    }

    #[test]
    fn expansion_is_memoized() {
        let text = "some *emphasis* here";
        let (registry, document) = setup(text, Some(Flavour::gfm()));
        let lazy = first_lazy_container(&registry, &document);
        assert!(lazy.expanded().is_none());
        let first = lazy.get_or_expand(&registry, text).unwrap().clone();
        let second = lazy.get_or_expand(&registry, text).unwrap().clone();
        assert_eq!(first, second);
        assert!(lazy.expanded().is_some());
    }

    #[test]
    fn expansion_is_idempotent_across_instances() {
        let text = "a **b** [c](/d)";
        let (registry, document) = setup(text, Some(Flavour::gfm()));
        let lazy_a = first_lazy_container(&registry, &document);
        let lazy_b = first_lazy_container(&registry, &document);
        let tree_a = lazy_a.get_or_expand(&registry, text).unwrap();
        let tree_b = lazy_b.get_or_expand(&registry, text).unwrap();
        assert_eq!(format!("{tree_a:#?}"), format!("{tree_b:#?}"));
    }

    #[test]
    fn missing_flavour_falls_back_to_default() {
        let text = "~~gone~~";
        let (registry, document) = setup(text, None);
        let lazy = first_lazy_container(&registry, &document);
        let subtree = lazy.get_or_expand(&registry, text).unwrap();
        // default flavour enables strikethrough, so the construct is parsed
        let strike = registry.element_type(MarkdownKind::STRIKETHROUGH);
        assert!(subtree.descendants().any(|n| n.kind() == strike));
    }

    #[test]
    fn non_container_nodes_are_rejected() {
        let text = "> quoted";
        let (registry, document) = setup(text, Some(Flavour::gfm()));
        let quote = document.tree().first_child().unwrap();
        assert_eq!(
            registry.markdown_kind(quote.kind()),
            Some(MarkdownKind::BLOCK_QUOTE)
        );
        assert!(LazyInline::for_node(&registry, &document, &quote).is_none());
    }
}
