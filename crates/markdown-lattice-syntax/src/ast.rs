//! The generic abstract syntax tree produced by the grammar.
//!
//! Nodes carry a [`MarkdownKind`], a byte range into the parsed buffer, and
//! an ordered list of children. Invariants, checked in debug builds:
//!
//! - a composite node's range equals the union of its children's ranges;
//! - children are ordered, non-overlapping, and contiguous;
//! - every child's range lies within its parent's range.
//!
//! The tree does not own any text. Callers slice the original buffer through
//! [`MarkdownNode::text`].

use std::ops::Range;

use crate::kind::MarkdownKind;

/// One node of the generic AST. Leaves have no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownNode {
    kind: MarkdownKind,
    range: Range<usize>,
    children: Vec<MarkdownNode>,
}

impl MarkdownNode {
    /// A leaf spanning `range`.
    pub fn leaf(kind: MarkdownKind, range: Range<usize>) -> Self {
        Self {
            kind,
            range,
            children: Vec::new(),
        }
    }

    /// A node with an explicit range. Children must tile the range exactly.
    pub fn new(kind: MarkdownKind, range: Range<usize>, children: Vec<MarkdownNode>) -> Self {
        if cfg!(debug_assertions) && !children.is_empty() {
            debug_assert_eq!(children.first().map(|c| c.start()), Some(range.start));
            debug_assert_eq!(children.last().map(|c| c.end()), Some(range.end));
            for pair in children.windows(2) {
                debug_assert_eq!(pair[0].end(), pair[1].start(), "children must be contiguous");
            }
        }
        Self {
            kind,
            range,
            children,
        }
    }

    /// A composite node whose range is derived from its (non-empty) children.
    pub fn node(kind: MarkdownKind, children: Vec<MarkdownNode>) -> Self {
        debug_assert!(!children.is_empty(), "derived-range node needs children");
        let range = children
            .first()
            .map(|c| c.start())
            .unwrap_or_default()..children.last().map(|c| c.end()).unwrap_or_default();
        Self::new(kind, range, children)
    }

    pub fn kind(&self) -> MarkdownKind {
        self.kind
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn children(&self) -> &[MarkdownNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Slice of the original buffer covered by this node.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }

    /// Pre-order traversal over this node and all descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &MarkdownNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Multi-line debug rendering, one node per line, indented by depth.
    pub fn dump(&self, source: &str) -> String {
        let mut out = String::new();
        self.dump_into(source, 0, &mut out);
        out
    }

    fn dump_into(&self, source: &str, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        if self.is_leaf() {
            let text = self.text(source).replace('\n', "\\n");
            out.push_str(&format!(
                "{indent}{:?}@{}..{} {:?}\n",
                self.kind, self.range.start, self.range.end, text
            ));
        } else {
            out.push_str(&format!(
                "{indent}{:?}@{}..{}\n",
                self.kind, self.range.start, self.range.end
            ));
            for child in &self.children {
                child.dump_into(source, depth + 1, out);
            }
        }
    }
}
