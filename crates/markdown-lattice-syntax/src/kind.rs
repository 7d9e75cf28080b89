//! The generic parser's node and token vocabulary.
//!
//! Tokens and composite nodes share a single enum, with tokens ordered first
//! so the two halves can be told apart by discriminant. The vocabulary is
//! closed: downstream consumers are expected to `match` on it rather than
//! dispatch dynamically.

/// Every node and token kind the generic Markdown parser can produce.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum MarkdownKind {
    // === Tokens (lexer output) ===
    /// Plain text run
    TEXT,
    /// Horizontal whitespace (spaces, tabs)
    WHITE_SPACE,
    /// Line ending (LF or CRLF)
    EOL,
    /// `#` run (ATX heading markers)
    HASH,
    /// `*` run (emphasis, lists, thematic breaks)
    STAR,
    /// `_` run (emphasis)
    UNDERSCORE,
    /// `~` run (strikethrough, tilde fences)
    TILDE,
    /// Backtick run (code spans, fences)
    BACKTICK,
    /// `-` run (lists, setext-2, thematic breaks)
    DASH,
    /// `=` run (setext-1)
    EQ,
    /// `+` (lists)
    PLUS,
    /// Digit run (ordered list markers, plain numbers)
    NUMBER,
    /// `.`
    DOT,
    /// `[`
    LBRACKET,
    /// `]`
    RBRACKET,
    /// `(`
    LPAREN,
    /// `)`
    RPAREN,
    /// `<`
    LT,
    /// `>`
    GT,
    /// `|`
    PIPE,
    /// `:`
    COLON,
    /// `!`
    EXCLAMATION,
    /// `"`
    DOUBLE_QUOTE,

    // === Tokens synthesized by the grammar (merged leaves) ===
    /// Ordered list marker (`1.` or `1)`)
    LIST_NUMBER,
    /// Info string of a fenced code block
    FENCE_LANG,
    /// One line of fenced code block content
    CODE_FENCE_CONTENT,
    /// Setext heading underline (`===` or `---`, with trailing spaces)
    SETEXT_UNDERLINE,
    /// The alignment/separator row of a pipe table
    TABLE_SEPARATOR,
    /// Link reference definition label, brackets included (`[ref]`)
    LINK_LABEL,
    /// Link destination (in definitions and inline links)
    LINK_DESTINATION,
    /// Quoted link title
    LINK_TITLE,
    /// HTML comment (`<!-- ... -->`), recognized when the flavour enables it
    COMMENT,
    /// Virtual end-of-input marker; never stored in a tree
    EOF,

    // === Composite nodes (parser output) ===
    /// Root of a full parse
    DOCUMENT,
    /// Paragraph block; inline content is left unparsed by the block pass
    PARAGRAPH,
    /// ATX headings by level
    ATX_1,
    ATX_2,
    ATX_3,
    ATX_4,
    ATX_5,
    ATX_6,
    /// Content holder of an ATX heading
    ATX_CONTENT,
    /// Setext headings by level
    SETEXT_1,
    SETEXT_2,
    /// Content holder of a setext heading
    SETEXT_CONTENT,
    /// Blockquote (`> ...`)
    BLOCK_QUOTE,
    /// Bullet list container
    UNORDERED_LIST,
    /// Numbered list container
    ORDERED_LIST,
    /// One list item
    LIST_ITEM,
    /// Fenced code block
    CODE_FENCE,
    /// Thematic break (`---`, `***`)
    THEMATIC_BREAK,
    /// Pipe table (flavour-gated)
    TABLE,
    /// Header row of a table
    TABLE_HEADER,
    /// Body row of a table
    TABLE_ROW,
    /// One table cell; content holder
    TABLE_CELL,
    /// Link reference definition (`[ref]: /url "title"`)
    LINK_DEFINITION,
    /// Emphasis (single-delimiter)
    EMPH,
    /// Strong emphasis (double-delimiter)
    STRONG,
    /// Strikethrough (flavour-gated)
    STRIKETHROUGH,
    /// Inline code span
    CODE_SPAN,
    /// Inline link `[text](url)`
    INLINE_LINK,
    /// The bracketed text part of an inline link
    LINK_TEXT,
    /// Autolink `<scheme:...>` (flavour-gated)
    AUTOLINK,
    /// Image `![alt](url)`
    IMAGE,
}

impl MarkdownKind {
    /// True for kinds the lexer or the grammar emits as leaves.
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// True for composite node kinds.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }
}
