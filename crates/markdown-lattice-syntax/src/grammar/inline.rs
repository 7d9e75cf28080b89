//! Inline grammar, applied to one content-holder span at a time.
//!
//! Delimiter pairing is greedy and single-pass: an opener pairs with the
//! nearest closer of its own kind. Openers with no closer degrade to plain
//! tokens, so the pass succeeds on any input.

use crate::ast::MarkdownNode;
use crate::kind::MarkdownKind::*;

use super::Parser;

/// Parse one inline element (or one plain token) at the cursor.
pub(crate) fn inline_element(p: &mut Parser, out: &mut Vec<MarkdownNode>) {
    match p.current() {
        STAR | UNDERSCORE => emphasis(p, out),
        TILDE if p.flavour().strikethrough && p.current_len() >= 2 => strikethrough(p, out),
        BACKTICK => code_span(p, out),
        LBRACKET => match link(p) {
            Some(node) => out.push(node),
            None => out.push(p.bump()),
        },
        EXCLAMATION if p.nth(1) == LBRACKET => image(p, out),
        LT => angle_construct(p, out),
        _ => out.push(p.bump()),
    }
}

fn emphasis(p: &mut Parser, out: &mut Vec<MarkdownNode>) {
    let marker = p.current();
    let strong = p.current_len() >= 2;
    let need = if strong { 2 } else { 1 };
    let close = p.find_from(p.index() + 1, |kind, len| kind == marker && len >= need);
    let Some(close) = close else {
        out.push(p.bump());
        return;
    };
    let mut children = vec![p.bump()];
    while p.index() < close {
        inline_element(p, &mut children);
    }
    // a nested element may have swallowed the closer; the node still
    // covers exactly what was consumed
    if p.index() == close {
        children.push(p.bump());
    }
    let kind = if strong { STRONG } else { EMPH };
    out.push(MarkdownNode::node(kind, children));
}

fn strikethrough(p: &mut Parser, out: &mut Vec<MarkdownNode>) {
    let close = p.find_from(p.index() + 1, |kind, len| kind == TILDE && len >= 2);
    let Some(close) = close else {
        out.push(p.bump());
        return;
    };
    let mut children = vec![p.bump()];
    while p.index() < close {
        inline_element(p, &mut children);
    }
    if p.index() == close {
        children.push(p.bump());
    }
    out.push(MarkdownNode::node(STRIKETHROUGH, children));
}

fn code_span(p: &mut Parser, out: &mut Vec<MarkdownNode>) {
    let open_len = p.current_len();
    let close = p.find_from(p.index() + 1, |kind, len| {
        kind == BACKTICK && len == open_len
    });
    let Some(close) = close else {
        out.push(p.bump());
        return;
    };
    let mut children = vec![p.bump()];
    // interior stays verbatim
    while p.index() < close {
        children.push(p.bump());
    }
    children.push(p.bump());
    out.push(MarkdownNode::node(CODE_SPAN, children));
}

/// `[text](destination "title")`. Returns `None` without consuming anything
/// when the shape does not hold; the caller then emits a plain `[`.
fn link(p: &mut Parser) -> Option<MarkdownNode> {
    let rb = p.find_from(p.index() + 1, |kind, _| kind == RBRACKET)?;
    if p.kind_at(rb + 1) != LPAREN {
        return None;
    }
    let rp = p.find_from(rb + 2, |kind, _| kind == RPAREN)?;

    let mut text_children = vec![p.bump()];
    while p.index() < rb {
        text_children.push(p.bump());
    }
    text_children.push(p.bump());
    let mut children = vec![MarkdownNode::node(LINK_TEXT, text_children)];
    children.push(p.bump()); // `(`
    if p.index() < rp && !p.at(WHITE_SPACE) {
        let mut d = 0;
        while p.index() + d < rp && !matches!(p.nth(d), WHITE_SPACE | EOL) {
            d += 1;
        }
        children.push(p.merge(LINK_DESTINATION, d));
    }
    if p.index() < rp && p.at(WHITE_SPACE) {
        children.push(p.bump());
    }
    if p.index() < rp {
        if p.at(DOUBLE_QUOTE) {
            children.push(p.merge(LINK_TITLE, rp - p.index()));
        } else {
            children.push(p.merge(TEXT, rp - p.index()));
        }
    }
    children.push(p.bump()); // `)`
    Some(MarkdownNode::node(INLINE_LINK, children))
}

fn image(p: &mut Parser, out: &mut Vec<MarkdownNode>) {
    let exclamation = p.bump();
    match link(p) {
        Some(link) => out.push(MarkdownNode::node(IMAGE, vec![exclamation, link])),
        None => out.push(exclamation),
    }
}

fn angle_construct(p: &mut Parser, out: &mut Vec<MarkdownNode>) {
    if p.flavour().comments && p.nth(1) == EXCLAMATION && p.nth(2) == DASH && p.nth_len(2) >= 2 {
        // `<!-- ... -->` collapses into a single comment lexeme
        let mut i = 3;
        loop {
            match p.nth(i) {
                GT if p.nth(i - 1) == DASH && p.nth_len(i - 1) >= 2 => {
                    out.push(p.merge(COMMENT, i + 1));
                    return;
                }
                EOF => break,
                _ => {}
            }
            i += 1;
        }
    }
    if p.flavour().autolinks {
        if let Some(node) = autolink(p) {
            out.push(node);
            return;
        }
    }
    out.push(p.bump());
}

/// `<scheme:rest>` with no whitespace inside.
fn autolink(p: &mut Parser) -> Option<MarkdownNode> {
    let mut i = 1;
    let mut saw_colon = false;
    loop {
        match p.nth(i) {
            GT => break,
            COLON => saw_colon = true,
            WHITE_SPACE | EOL | EOF => return None,
            _ => {}
        }
        i += 1;
    }
    if !saw_colon || i == 1 {
        return None;
    }
    let mut children = vec![p.bump()];
    for _ in 1..=i {
        children.push(p.bump());
    }
    Some(MarkdownNode::node(AUTOLINK, children))
}
