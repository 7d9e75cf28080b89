//! Single-slot parse cache.

use std::cell::{Cell, RefCell};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use markdown_lattice_syntax::{parse, Flavour, MarkdownNode};

struct Slot {
    hash: u64,
    text: String,
    flavour: Flavour,
    ast: Arc<MarkdownNode>,
}

/// Memoizes the most recent parse of one execution context.
///
/// Hosts ask for "parse this document" several times in a row while handling
/// a single interaction (highlighting, folding, outline), usually against an
/// unchanged buffer. One slot collapses those into one parse; it is not an
/// LRU, because the dominant pattern is "same buffer, several consecutive
/// callers".
///
/// A hit requires the content hash, the full text, and the flavour to all
/// match; the hash is a prefilter, not a proof. On a hit the cached AST is
/// returned by `Arc` identity.
///
/// The cache is deliberately not `Sync`: each execution context (thread,
/// worker, task) owns its own instance.
pub struct ParseCache {
    slot: RefCell<Option<Slot>>,
    parses: Cell<usize>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
            parses: Cell::new(0),
        }
    }

    /// Parse `text` under `flavour`, reusing the cached AST when both match
    /// the previous call.
    pub fn parse(&self, text: &str, flavour: &Flavour) -> Arc<MarkdownNode> {
        let hash = content_hash(text);
        if let Some(slot) = self.slot.borrow().as_ref() {
            if slot.hash == hash && slot.flavour == *flavour && slot.text == text {
                return Arc::clone(&slot.ast);
            }
        }
        self.parses.set(self.parses.get() + 1);
        let ast = Arc::new(parse(flavour, text));
        *self.slot.borrow_mut() = Some(Slot {
            hash,
            text: text.to_owned(),
            flavour: *flavour,
            ast: Arc::clone(&ast),
        });
        ast
    }

    /// How many times the underlying parser has actually run.
    pub fn parse_count(&self) -> usize {
        self.parses.get()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new()
    }
}

fn content_hash(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn repeated_parse_returns_the_same_arc() {
        let cache = ParseCache::new();
        let first = cache.parse("abc", &Flavour::default());
        let second = cache.parse("abc", &Flavour::default());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.parse_count(), 1);
    }

    #[test]
    fn different_text_evicts_the_slot() {
        let cache = ParseCache::new();
        let first = cache.parse("abc", &Flavour::default());
        cache.parse("xyz", &Flavour::default());
        let third = cache.parse("abc", &Flavour::default());
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(cache.parse_count(), 3);
    }

    #[test]
    fn different_flavour_is_a_miss_even_for_identical_text() {
        let cache = ParseCache::new();
        let gfm = cache.parse("| a |\n| - |", &Flavour::gfm());
        let plain = cache.parse("| a |\n| - |", &Flavour::commonmark());
        assert!(!Arc::ptr_eq(&gfm, &plain));
        assert_eq!(cache.parse_count(), 2);
    }
}
