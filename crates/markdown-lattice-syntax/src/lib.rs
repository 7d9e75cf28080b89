//! # markdown-lattice-syntax
//!
//! The generic Markdown parser: a [Logos] lexer plus a hand-written,
//! error-tolerant grammar producing a lossless generic AST.
//!
//! [Logos]: https://docs.rs/logos
//!
//! "Generic" means editor-agnostic. Nothing in this crate knows about mapped
//! element types, parse caches, or lazy expansion; it turns text into
//! [`MarkdownNode`] trees and nothing else. The `markdown-lattice-bridge`
//! crate layers the editor-facing machinery on top.
//!
//! ## Pipeline
//!
//! ```text
//! Source Text → Lexer → Tokens → Block grammar → Generic AST
//!               (Logos)                          (content holders kept raw)
//!                                  Inline grammar ← expanded per span, later
//! ```
//!
//! Two properties hold for every parse:
//!
//! - **Lossless**: the children of every node tile its range exactly, so the
//!   tree covers every byte of the input and text can be reconstructed from
//!   leaf ranges alone.
//! - **Total**: no input is rejected. Constructs that fail to close degrade
//!   to plain tokens instead of producing errors.
//!
//! ## Module Structure
//!
//! ```text
//! markdown-lattice-syntax/
//! ├── lib.rs        # public API
//! ├── kind.rs       # MarkdownKind: token and node vocabulary
//! ├── flavour.rs    # Flavour: grammar extension switches
//! ├── lexer.rs      # Logos tokenizer
//! ├── ast.rs        # MarkdownNode generic AST
//! └── grammar/
//!     ├── mod.rs    # Parser cursor, parse() and parse_inline()
//!     ├── block.rs  # block-level rules
//!     └── inline.rs # inline rules
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use markdown_lattice_syntax::{parse, Flavour, MarkdownKind};
//!
//! let text = "# Hello\n";
//! let tree = parse(&Flavour::gfm(), text);
//!
//! assert_eq!(tree.kind(), MarkdownKind::DOCUMENT);
//! assert_eq!(tree.range(), 0..text.len());
//!
//! let heading = &tree.children()[0];
//! assert_eq!(heading.kind(), MarkdownKind::ATX_1);
//! assert_eq!(heading.text(text), "# Hello");
//! ```

pub mod ast;
pub mod flavour;
pub mod grammar;
pub mod kind;
pub mod lexer;

pub use ast::MarkdownNode;
pub use flavour::Flavour;
pub use grammar::{parse, parse_inline};
pub use kind::MarkdownKind;
pub use lexer::{lex, Token};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_byte_is_covered_by_some_leaf() {
        let text = "# H\n\nSome *text* with [a](/link).\n\n| x |\n| - |\n| y |\n";
        let tree = parse(&Flavour::gfm(), text);
        let mut covered = vec![false; text.len()];
        for node in tree.descendants().filter(|n| n.is_leaf()) {
            for flag in &mut covered[node.range()] {
                assert!(!*flag, "leaf ranges overlap");
                *flag = true;
            }
        }
        assert!(covered.iter().all(|&c| c), "leaf ranges leave a gap");
    }

    #[test]
    fn inline_expansion_preserves_the_holder_span() {
        let text = "before **bold** after";
        let tree = parse(&Flavour::gfm(), text);
        let paragraph = &tree.children()[0];
        let expanded = parse_inline(
            &Flavour::gfm(),
            paragraph.kind(),
            text,
            paragraph.start(),
            paragraph.end(),
        );
        assert_eq!(expanded.kind(), paragraph.kind());
        assert_eq!(expanded.range(), paragraph.range());
        assert!(expanded.descendants().any(|n| n.kind() == MarkdownKind::STRONG));
    }

    #[test]
    fn parse_is_deterministic() {
        let text = "## Heading\n\n- a\n- b\n\n> quote\n";
        let first = parse(&Flavour::gfm(), text);
        let second = parse(&Flavour::gfm(), text);
        assert_eq!(first, second);
    }
}
