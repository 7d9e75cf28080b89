//! Headers index hooks.
//!
//! Headings participate in a persistent structural index keyed by their
//! text. The bridge's responsibility ends at walking a target tree, deriving
//! a stub per heading, and feeding occurrences into a host-provided sink;
//! storage and lookup live on the host side.

use serde::{Deserialize, Serialize};

use crate::element::{ElementTypeRegistry, SyntaxNode};

/// Index key under which all heading occurrences are filed.
pub const HEADERS_INDEX_KEY: &str = "markdown.header";

/// Receiver for index occurrences, provided by the host.
pub trait IndexSink {
    fn occurrence(&mut self, key: &str, text: &str);
}

/// The serializable stub of one heading: the name it is indexed under, or
/// `None` for a heading with no content (`#` on its own line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderStub {
    pub indexed_name: Option<String>,
}

/// Derive the stub for a heading node: the trimmed text of its content
/// holder child.
pub fn header_stub(registry: &ElementTypeRegistry, heading: &SyntaxNode) -> HeaderStub {
    let indexed_name = heading
        .children()
        .find(|child| registry.is_lazy_container(child.kind()))
        .map(|content| content.text().to_string().trim().to_owned())
        .filter(|name| !name.is_empty());
    HeaderStub { indexed_name }
}

/// Walk a target tree and emit one occurrence per indexable heading with a
/// non-empty name. Runs outside the hot parse path.
pub fn index_headers(
    registry: &ElementTypeRegistry,
    tree: &SyntaxNode,
    sink: &mut impl IndexSink,
) {
    for node in tree.descendants() {
        if !registry.is_header(node.kind()) {
            continue;
        }
        if let Some(name) = header_stub(registry, &node).indexed_name {
            sink.occurrence(HEADERS_INDEX_KEY, &name);
        }
    }
}
