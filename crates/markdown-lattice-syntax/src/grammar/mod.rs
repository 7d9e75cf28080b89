//! Grammar rules: the token stream goes in, a generic AST comes out.
//!
//! The grammar runs in two independent passes:
//!
//! - [`block::document`] computes block structure for a whole buffer and
//!   leaves the inline content of paragraphs, heading contents and table
//!   cells as unparsed token runs;
//! - [`inline`] rules parse emphasis, links, code spans and friends inside a
//!   single content-holder span, on demand.
//!
//! The split exists for the consumers: block shape is needed immediately for
//! a whole document, inline detail only for the spans actually looked at.
//!
//! Both passes are forgiving. No input is ever rejected; constructs that do
//! not close degrade to plain tokens.

pub(crate) mod block;
pub(crate) mod inline;

use crate::ast::MarkdownNode;
use crate::flavour::Flavour;
use crate::kind::MarkdownKind;
use crate::lexer::Token;

/// Cursor over the token stream, shared by the block and inline rules.
///
/// Grammar functions consume tokens through [`bump`](Parser::bump) (one
/// token, one leaf) and [`merge`](Parser::merge) (several tokens, one retyped
/// leaf), and look ahead through [`nth`](Parser::nth) without consuming.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    flavour: Flavour,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>, flavour: Flavour) -> Self {
        Self {
            tokens,
            pos: 0,
            flavour,
        }
    }

    pub(crate) fn flavour(&self) -> &Flavour {
        &self.flavour
    }

    /// Current token kind, or EOF past the end.
    pub(crate) fn current(&self) -> MarkdownKind {
        self.nth(0)
    }

    /// Byte length of the current token (0 past the end).
    pub(crate) fn current_len(&self) -> usize {
        self.nth_len(0)
    }

    /// Look ahead n tokens.
    pub(crate) fn nth(&self, n: usize) -> MarkdownKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(MarkdownKind::EOF)
    }

    /// Byte length of the token n ahead (0 past the end).
    pub(crate) fn nth_len(&self, n: usize) -> usize {
        self.tokens.get(self.pos + n).map(|t| t.len()).unwrap_or(0)
    }

    pub(crate) fn at(&self, kind: MarkdownKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Absolute index of the cursor into the token stream.
    pub(crate) fn index(&self) -> usize {
        self.pos
    }

    /// Token kind at an absolute index.
    pub(crate) fn kind_at(&self, index: usize) -> MarkdownKind {
        self.tokens
            .get(index)
            .map(|t| t.kind)
            .unwrap_or(MarkdownKind::EOF)
    }

    /// Consume the current token as a leaf keeping its lexed kind.
    pub(crate) fn bump(&mut self) -> MarkdownNode {
        debug_assert!(!self.at_end(), "bump past end of input");
        let token = &self.tokens[self.pos];
        let leaf = MarkdownNode::leaf(token.kind, token.range.clone());
        self.pos += 1;
        leaf
    }

    /// Consume `count` tokens as one retyped leaf spanning all of them.
    pub(crate) fn merge(&mut self, kind: MarkdownKind, count: usize) -> MarkdownNode {
        debug_assert!(count >= 1 && self.pos + count <= self.tokens.len());
        let start = self.tokens[self.pos].range.start;
        let end = self.tokens[self.pos + count - 1].range.end;
        self.pos += count;
        MarkdownNode::leaf(kind, start..end)
    }

    /// Number of tokens from the cursor up to (not including) the next EOL.
    pub(crate) fn tokens_until_eol(&self) -> usize {
        let mut n = 0;
        while !matches!(self.nth(n), MarkdownKind::EOL | MarkdownKind::EOF) {
            n += 1;
        }
        n
    }

    /// First absolute index at or after `from` whose token satisfies the
    /// predicate over (kind, byte length).
    pub(crate) fn find_from(
        &self,
        from: usize,
        mut pred: impl FnMut(MarkdownKind, usize) -> bool,
    ) -> Option<usize> {
        (from..self.tokens.len()).find(|&i| pred(self.tokens[i].kind, self.tokens[i].len()))
    }
}

/// Parse a whole buffer into block structure.
///
/// Inline content of paragraphs, heading contents and table cells is kept as
/// raw token runs inside their container nodes; see [`parse_inline`].
pub fn parse(flavour: &Flavour, text: &str) -> MarkdownNode {
    let tokens = crate::lexer::lex(text);
    let mut p = Parser::new(tokens, *flavour);
    block::document(&mut p, text.len())
}

/// Parse the inline structure of `text[start..end]`.
///
/// Returns a node of the given `kind` spanning exactly `start..end`, with
/// inline elements as children. Offsets in the result are relative to `text`,
/// so the subtree drops into place wherever the span came from.
pub fn parse_inline(
    flavour: &Flavour,
    kind: MarkdownKind,
    text: &str,
    start: usize,
    end: usize,
) -> MarkdownNode {
    let mut tokens = crate::lexer::lex(&text[start..end]);
    for token in &mut tokens {
        token.range = token.range.start + start..token.range.end + start;
    }
    let mut p = Parser::new(tokens, *flavour);
    let mut children = Vec::new();
    while !p.at_end() {
        inline::inline_element(&mut p, &mut children);
    }
    MarkdownNode::new(kind, start..end, children)
}
