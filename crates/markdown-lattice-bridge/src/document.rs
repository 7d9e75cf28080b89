//! Whole-document parsing: cache, replay, target tree, flavour association.

use std::sync::Arc;

use markdown_lattice_syntax::Flavour;

use crate::builder::TreeBuilder;
use crate::cache::ParseCache;
use crate::element::{ElementTypeRegistry, SyntaxNode};
use crate::error::SyncError;
use crate::visitor::TreeFillingVisitor;

/// Turns raw text into a target tree: parse through the cache, then replay
/// the generic AST into a [`TreeBuilder`] over the same text.
pub struct DocumentParser {
    registry: Arc<ElementTypeRegistry>,
}

impl DocumentParser {
    pub fn new(registry: Arc<ElementTypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ElementTypeRegistry> {
        &self.registry
    }

    /// Build the target tree for `text`. The only failure mode is the replay
    /// desynchronizing, which cannot happen when AST and builder both come
    /// from `text` and `flavour` as they do here; the `Result` surfaces the
    /// invariant instead of hiding a panic.
    pub fn parse(
        &self,
        cache: &ParseCache,
        text: &str,
        flavour: &Flavour,
    ) -> Result<SyntaxNode, SyncError> {
        let ast = cache.parse(text, flavour);
        let mut builder = TreeBuilder::new(text, Arc::clone(&self.registry));
        let visitor = TreeFillingVisitor::new(Arc::clone(&self.registry));
        visitor.fill(&mut builder, &ast)?;
        debug_assert!(builder.eof(), "document replay left tokens unconsumed");
        Ok(builder.finish())
    }
}

/// A parsed document plus its recorded flavour.
///
/// The flavour association is optional on purpose: hosts attach a flavour to
/// a file out of band, and a missing association is tolerated. Lazy inline
/// expansion reads it back through [`Document::flavour`] and falls back
/// loudly when it is absent.
pub struct Document {
    text: String,
    flavour: Option<Flavour>,
    tree: SyntaxNode,
}

impl Document {
    /// Parse `text` into a document. A `None` flavour parses under the
    /// process default but keeps the absence recorded.
    pub fn parse(
        parser: &DocumentParser,
        cache: &ParseCache,
        text: String,
        flavour: Option<Flavour>,
    ) -> Result<Self, SyncError> {
        let effective = flavour.unwrap_or_default();
        let tree = parser.parse(cache, &text, &effective)?;
        Ok(Self {
            text,
            flavour,
            tree,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The flavour recorded against this document, if any.
    pub fn flavour(&self) -> Option<&Flavour> {
        self.flavour.as_ref()
    }

    pub fn tree(&self) -> &SyntaxNode {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_lattice_syntax::MarkdownKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn document_tree_covers_the_text() {
        let registry = Arc::new(ElementTypeRegistry::new());
        let parser = DocumentParser::new(registry);
        let cache = ParseCache::new();
        let text = "# One\n\n- a\n- b\n";
        let document =
            Document::parse(&parser, &cache, text.to_owned(), Some(Flavour::gfm())).unwrap();
        assert_eq!(document.tree().text().to_string(), text);
        assert_eq!(document.flavour(), Some(&Flavour::gfm()));
    }

    #[test]
    fn empty_text_parses_to_an_empty_document_node() {
        let registry = Arc::new(ElementTypeRegistry::new());
        let parser = DocumentParser::new(Arc::clone(&registry));
        let cache = ParseCache::new();
        let tree = parser.parse(&cache, "", &Flavour::default()).unwrap();
        assert_eq!(registry.markdown_kind(tree.kind()), Some(MarkdownKind::DOCUMENT));
        assert_eq!(tree.text().to_string(), "");
    }
}
