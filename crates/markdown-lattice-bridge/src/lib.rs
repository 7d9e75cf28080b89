//! # markdown-lattice-bridge
//!
//! The incremental parsing and tree-synchronization layer between the
//! generic Markdown parser (`markdown-lattice-syntax`) and a lossless
//! [rowan]-based target tree.
//!
//! [rowan]: https://docs.rs/rowan
//!
//! ## Components
//!
//! - [`element`] - the type mapper: a bijective, append-only registry from
//!   generic [`MarkdownKind`](markdown_lattice_syntax::MarkdownKind)s to
//!   dense [`ElementType`] ids that double as
//!   rowan raw kinds, with per-type categories (plain, lazy container,
//!   header-indexable).
//! - [`cache`] - a single-slot parse cache per execution context, with a
//!   hash prefilter, full content + flavour equality, and `Arc` identity on
//!   hits.
//! - [`builder`] / [`visitor`] - the marker-based tree builder and the
//!   depth-first replay of a generic AST into it, offset-checked at every
//!   node boundary; divergence is a fatal [`SyncError`].
//! - [`lazy`] - on-demand inline expansion of content-holder nodes, pure and
//!   memoized.
//! - [`toplevel`] - the flat lexeme stream for token-oriented consumers.
//! - [`headers`] - stub derivation and index hooks for heading nodes.
//! - [`document`] - the whole-document entry point tying cache, replay and
//!   flavour association together.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use markdown_lattice_bridge::cache::ParseCache;
//! use markdown_lattice_bridge::document::{Document, DocumentParser};
//! use markdown_lattice_bridge::element::ElementTypeRegistry;
//! use markdown_lattice_syntax::Flavour;
//!
//! let registry = Arc::new(ElementTypeRegistry::new());
//! let parser = DocumentParser::new(Arc::clone(&registry));
//! let cache = ParseCache::new();
//!
//! let document = Document::parse(
//!     &parser,
//!     &cache,
//!     "# Hello\n".to_owned(),
//!     Some(Flavour::gfm()),
//! )
//! .unwrap();
//!
//! assert_eq!(document.tree().text().to_string(), "# Hello\n");
//! ```

pub mod builder;
pub mod cache;
pub mod document;
pub mod element;
pub mod error;
pub mod headers;
pub mod lazy;
pub mod toplevel;
pub mod visitor;

pub use builder::{Marker, TreeBuilder};
pub use cache::ParseCache;
pub use document::{Document, DocumentParser};
pub use element::{
    ElementCategory, ElementType, ElementTypeRegistry, LatticeLang, SyntaxElement, SyntaxNode,
    SyntaxToken,
};
pub use error::SyncError;
pub use headers::{header_stub, index_headers, HeaderStub, IndexSink, HEADERS_INDEX_KEY};
pub use lazy::{expand_inline, LazyInline};
pub use toplevel::{Lexeme, TokenStream};
pub use visitor::TreeFillingVisitor;
