//! Tokenizing Markdown source with [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! Every byte of the input lands in exactly one token; nothing is skipped or
//! discarded. Repeatable marker characters lex as maximal runs (`##`, `**`,
//! `---`), so a double-star emphasis delimiter is a single two-byte token.
//! Downstream that gives merged lexemes without a separate merging pass.
//!
//! The lexer is context-free on purpose: it does not know whether `-` opens a
//! list, underlines a setext heading, or draws a thematic break. That is the
//! grammar's job.

use std::ops::Range;

use logos::Logos;

use crate::kind::MarkdownKind;

/// Raw token classes recognized by the Logos state machine.
///
/// This enum exists separately from [`MarkdownKind`] because Logos needs its
/// own derive target; [`RawToken::to_kind`] converts.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"#+")]
    Hash,

    #[regex(r"\*+")]
    Star,

    #[regex(r"_+")]
    Underscore,

    #[regex(r"~+")]
    Tilde,

    #[regex(r"`+")]
    Backtick,

    #[regex(r"-+")]
    Dash,

    #[regex(r"=+")]
    Eq,

    #[token("+")]
    Plus,

    #[regex(r"[0-9]+")]
    Number,

    #[token(".")]
    Dot,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("|")]
    Pipe,

    #[token(":")]
    Colon,

    #[token("!")]
    Exclaim,

    #[token("\"")]
    DoubleQuote,

    /// Anything not matched by the rules above, in maximal runs.
    #[regex(r#"[^ \t\r\n#*_~`=+0-9.\[\]()<>|:!"-]+"#)]
    Text,
}

impl RawToken {
    fn to_kind(self) -> MarkdownKind {
        match self {
            RawToken::Whitespace => MarkdownKind::WHITE_SPACE,
            RawToken::Newline => MarkdownKind::EOL,
            RawToken::Hash => MarkdownKind::HASH,
            RawToken::Star => MarkdownKind::STAR,
            RawToken::Underscore => MarkdownKind::UNDERSCORE,
            RawToken::Tilde => MarkdownKind::TILDE,
            RawToken::Backtick => MarkdownKind::BACKTICK,
            RawToken::Dash => MarkdownKind::DASH,
            RawToken::Eq => MarkdownKind::EQ,
            RawToken::Plus => MarkdownKind::PLUS,
            RawToken::Number => MarkdownKind::NUMBER,
            RawToken::Dot => MarkdownKind::DOT,
            RawToken::LBracket => MarkdownKind::LBRACKET,
            RawToken::RBracket => MarkdownKind::RBRACKET,
            RawToken::LParen => MarkdownKind::LPAREN,
            RawToken::RParen => MarkdownKind::RPAREN,
            RawToken::Lt => MarkdownKind::LT,
            RawToken::Gt => MarkdownKind::GT,
            RawToken::Pipe => MarkdownKind::PIPE,
            RawToken::Colon => MarkdownKind::COLON,
            RawToken::Exclaim => MarkdownKind::EXCLAMATION,
            RawToken::DoubleQuote => MarkdownKind::DOUBLE_QUOTE,
            RawToken::Text => MarkdownKind::TEXT,
        }
    }
}

/// A lexed token: its kind and byte range in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: MarkdownKind,
    pub range: Range<usize>,
}

impl Token {
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

/// Lex the input into a sequence of tokens whose ranges tile the input.
pub fn lex(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(input);

    while let Some(result) = lexer.next() {
        let kind = match result {
            Ok(raw) => raw.to_kind(),
            // Unrecognized bytes (a bare carriage return, for instance)
            // degrade to text; the grammar never rejects input.
            Err(()) => MarkdownKind::TEXT,
        };
        tokens.push(Token {
            kind,
            range: lexer.span(),
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kinds(input: &str) -> Vec<MarkdownKind> {
        lex(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_plain_text() {
        let tokens = lex("hello");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, MarkdownKind::TEXT);
        assert_eq!(tokens[0].range, 0..5);
    }

    #[test]
    fn marker_characters_lex_as_runs() {
        let tokens = lex("## **bold** ---");
        assert_eq!(tokens[0].kind, MarkdownKind::HASH);
        assert_eq!(tokens[0].len(), 2);
        assert_eq!(tokens[2].kind, MarkdownKind::STAR);
        assert_eq!(tokens[2].len(), 2);
        let dash = tokens.last().unwrap();
        assert_eq!(dash.kind, MarkdownKind::DASH);
        assert_eq!(dash.len(), 3);
    }

    #[test]
    fn lex_heading_line() {
        assert_eq!(
            kinds("# Hello"),
            vec![
                MarkdownKind::HASH,
                MarkdownKind::WHITE_SPACE,
                MarkdownKind::TEXT,
            ]
        );
    }

    #[test]
    fn lex_crlf_newline() {
        let tokens = lex("a\r\nb");
        assert_eq!(tokens[1].kind, MarkdownKind::EOL);
        assert_eq!(tokens[1].range, 1..3);
    }

    #[test]
    fn digits_lex_separately_from_text() {
        assert_eq!(
            kinds("1. item"),
            vec![
                MarkdownKind::NUMBER,
                MarkdownKind::DOT,
                MarkdownKind::WHITE_SPACE,
                MarkdownKind::TEXT,
            ]
        );
    }

    #[test]
    fn all_bytes_covered_in_order() {
        let input = "## Heading\n\n> A *quote* with [link](url)\n\n- item\n\n```rust\ncode\n```";
        let tokens = lex(input);
        let mut offset = 0;
        for token in &tokens {
            assert_eq!(token.range.start, offset, "gap before {token:?}");
            offset = token.range.end;
        }
        assert_eq!(offset, input.len());
    }

    #[rstest]
    #[case("#", MarkdownKind::HASH, 1)]
    #[case("######", MarkdownKind::HASH, 6)]
    #[case("***", MarkdownKind::STAR, 3)]
    #[case("~~", MarkdownKind::TILDE, 2)]
    #[case("````", MarkdownKind::BACKTICK, 4)]
    #[case("===", MarkdownKind::EQ, 3)]
    #[case("1234", MarkdownKind::NUMBER, 4)]
    fn runs_lex_as_single_tokens(
        #[case] input: &str,
        #[case] kind: MarkdownKind,
        #[case] len: usize,
    ) {
        let tokens = lex(input);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, kind);
        assert_eq!(tokens[0].len(), len);
    }

    #[test]
    fn lone_carriage_return_degrades_to_text() {
        let tokens = lex("a\rb");
        assert_eq!(tokens[1].kind, MarkdownKind::TEXT);
        assert_eq!(tokens[1].range, 1..2);
    }
}
