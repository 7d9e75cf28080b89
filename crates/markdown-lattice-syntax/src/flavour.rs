//! Flavour descriptors: which grammar extensions are active for a parse.

use serde::{Deserialize, Serialize};

/// Selects the Markdown grammar extensions for a parse.
///
/// A `Flavour` is cheap to copy and compare; the parse cache treats it as
/// part of the cache key. The default flavour is GFM-like with HTML comment
/// recognition, matching what interactive editors expect out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flavour {
    /// Pipe tables.
    pub tables: bool,
    /// `~~strikethrough~~`.
    pub strikethrough: bool,
    /// `<scheme:...>` autolinks.
    pub autolinks: bool,
    /// `<!-- ... -->` recognized as a single comment token.
    pub comments: bool,
}

impl Flavour {
    /// GFM-style flavour with comment awareness. This is the process default.
    pub fn gfm() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolinks: true,
            comments: true,
        }
    }

    /// Plain CommonMark: no tables, no strikethrough, no comment token.
    pub fn commonmark() -> Self {
        Self {
            tables: false,
            strikethrough: false,
            autolinks: true,
            comments: false,
        }
    }
}

impl Default for Flavour {
    fn default() -> Self {
        Self::gfm()
    }
}
