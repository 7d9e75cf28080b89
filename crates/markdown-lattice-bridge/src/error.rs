//! Error types of the bridge.

use thiserror::Error;

/// The tree builder's token cursor could not be advanced to exactly the
/// offset an AST node declared.
///
/// This is a precondition violation, not a parse error: it means the token
/// stream backing the builder and the AST being replayed were derived from
/// different text or different flavours. It is never retried; the parse that
/// hit it is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "parsed tree and lexer are unsynchronized in {context}: \
     expected offset {expected}, cursor at {actual}"
)]
pub struct SyncError {
    /// The offset the AST node declared.
    pub expected: usize,
    /// Where the cursor actually ended up.
    pub actual: usize,
    /// The node being replayed when the fault was detected.
    pub context: String,
}
