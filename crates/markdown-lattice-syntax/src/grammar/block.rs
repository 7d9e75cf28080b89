//! Block-level grammar.
//!
//! One pass over the token stream, line oriented. Container blocks (lists,
//! quotes, tables) are built directly; the inline content of paragraphs,
//! heading contents and table cells stays as raw token runs inside a
//! content-holder node, to be expanded later by the inline rules.

use crate::ast::MarkdownNode;
use crate::kind::MarkdownKind::{self, *};

use super::Parser;

/// Parse all blocks of a buffer into a DOCUMENT spanning `0..text_len`.
pub(crate) fn document(p: &mut Parser, text_len: usize) -> MarkdownNode {
    let mut children = Vec::new();
    while !p.at_end() {
        match p.current() {
            EOL => children.push(p.bump()),
            // whitespace-only line
            WHITE_SPACE if matches!(p.nth(1), EOL | EOF) => children.push(p.bump()),
            _ => block(p, &mut children),
        }
    }
    MarkdownNode::new(DOCUMENT, 0..text_len, children)
}

fn block(p: &mut Parser, out: &mut Vec<MarkdownNode>) {
    if at_atx(p, 0) {
        out.push(atx_heading(p));
    } else if p.at(GT) {
        out.push(block_quote(p));
    } else if at_fence(p, 0) {
        out.push(fenced_code(p));
    } else if at_thematic_break(p, 0) {
        out.push(thematic_break(p));
    } else if at_bullet(p, 0) {
        out.push(list(p, false));
    } else if at_ordered_bullet(p, 0) {
        out.push(list(p, true));
    } else if at_link_definition(p) {
        out.push(link_definition(p));
    } else if p.flavour().tables && at_table(p, 0) {
        out.push(table(p));
    } else {
        out.push(paragraph_or_setext(p));
    }
}

// === Lookahead predicates. `n` is an offset from the cursor. ===

fn at_atx(p: &Parser, n: usize) -> bool {
    p.nth(n) == HASH && p.nth_len(n) <= 6 && matches!(p.nth(n + 1), WHITE_SPACE | EOL | EOF)
}

fn at_fence(p: &Parser, n: usize) -> bool {
    matches!(p.nth(n), BACKTICK | TILDE) && p.nth_len(n) >= 3
}

fn at_thematic_break(p: &Parser, n: usize) -> bool {
    let marker = p.nth(n);
    if !matches!(marker, DASH | STAR | UNDERSCORE) {
        return false;
    }
    let mut chars = 0;
    let mut i = n;
    loop {
        match p.nth(i) {
            kind if kind == marker => chars += p.nth_len(i),
            WHITE_SPACE => {}
            EOL | EOF => return chars >= 3,
            _ => return false,
        }
        i += 1;
    }
}

fn at_bullet(p: &Parser, n: usize) -> bool {
    let marker = (matches!(p.nth(n), DASH | STAR) && p.nth_len(n) == 1) || p.nth(n) == PLUS;
    marker && p.nth(n + 1) == WHITE_SPACE
}

fn at_ordered_bullet(p: &Parser, n: usize) -> bool {
    p.nth(n) == NUMBER
        && matches!(p.nth(n + 1), DOT | RPAREN)
        && p.nth(n + 2) == WHITE_SPACE
}

fn at_setext_underline(p: &Parser, n: usize) -> bool {
    matches!(p.nth(n), EQ | DASH) && rest_of_line_blank(p, n + 1)
}

fn rest_of_line_blank(p: &Parser, n: usize) -> bool {
    match p.nth(n) {
        EOL | EOF => true,
        WHITE_SPACE => matches!(p.nth(n + 1), EOL | EOF),
        _ => false,
    }
}

fn at_link_definition(p: &Parser) -> bool {
    if !p.at(LBRACKET) {
        return false;
    }
    let mut i = 1;
    loop {
        match p.nth(i) {
            RBRACKET => break,
            EOL | EOF => return false,
            _ => i += 1,
        }
    }
    if i < 2 || p.nth(i + 1) != COLON {
        return false;
    }
    // a destination must follow the colon on the same line
    let after = if p.nth(i + 2) == WHITE_SPACE { i + 3 } else { i + 2 };
    !matches!(p.nth(after), EOL | EOF)
}

fn at_table(p: &Parser, n: usize) -> bool {
    let mut i = n;
    let mut header_pipe = false;
    loop {
        match p.nth(i) {
            PIPE => header_pipe = true,
            EOL => break,
            EOF => return false,
            _ => {}
        }
        i += 1;
    }
    if !header_pipe {
        return false;
    }
    // the line below must be an alignment row: pipes, dashes, colons, spaces
    let mut j = i + 1;
    let mut sep_dash = false;
    let mut sep_pipe = false;
    loop {
        match p.nth(j) {
            DASH => sep_dash = true,
            PIPE => sep_pipe = true,
            COLON | WHITE_SPACE => {}
            EOL | EOF => return sep_dash && sep_pipe,
            _ => return false,
        }
        j += 1;
    }
}

fn line_has_pipe(p: &Parser, n: usize) -> bool {
    let mut i = n;
    loop {
        match p.nth(i) {
            PIPE => return true,
            EOL | EOF => return false,
            _ => i += 1,
        }
    }
}

fn paragraph_continues(p: &Parser) -> bool {
    match p.nth(1) {
        EOL | EOF => false,
        WHITE_SPACE if matches!(p.nth(2), EOL | EOF) => false,
        GT => false,
        _ => {
            !(at_atx(p, 1)
                || at_fence(p, 1)
                || at_thematic_break(p, 1)
                || at_bullet(p, 1)
                || at_ordered_bullet(p, 1)
                || (p.flavour().tables && at_table(p, 1)))
        }
    }
}

// === Block rules ===

fn atx_heading(p: &mut Parser) -> MarkdownNode {
    let kind = match p.current_len() {
        1 => ATX_1,
        2 => ATX_2,
        3 => ATX_3,
        4 => ATX_4,
        5 => ATX_5,
        _ => ATX_6,
    };
    let mut children = vec![p.bump()];
    if p.at(WHITE_SPACE) {
        children.push(p.bump());
        if !matches!(p.current(), EOL | EOF) {
            let mut content = Vec::new();
            while !matches!(p.current(), EOL | EOF) {
                content.push(p.bump());
            }
            children.push(MarkdownNode::node(ATX_CONTENT, content));
        }
    }
    MarkdownNode::node(kind, children)
}

fn block_quote(p: &mut Parser) -> MarkdownNode {
    let mut children = Vec::new();
    loop {
        children.push(p.bump()); // `>`
        if p.at(WHITE_SPACE) {
            children.push(p.bump());
        }
        if !matches!(p.current(), EOL | EOF) {
            let mut content = Vec::new();
            while !matches!(p.current(), EOL | EOF) {
                content.push(p.bump());
            }
            children.push(MarkdownNode::node(PARAGRAPH, content));
        }
        if p.at(EOL) && p.nth(1) == GT {
            children.push(p.bump());
            continue;
        }
        break;
    }
    MarkdownNode::node(BLOCK_QUOTE, children)
}

fn thematic_break(p: &mut Parser) -> MarkdownNode {
    let mut children = Vec::new();
    while !matches!(p.current(), EOL | EOF) {
        children.push(p.bump());
    }
    MarkdownNode::node(THEMATIC_BREAK, children)
}

fn fenced_code(p: &mut Parser) -> MarkdownNode {
    let fence = p.current();
    let open_len = p.current_len();
    let mut children = vec![p.bump()];
    if !matches!(p.current(), EOL | EOF) {
        children.push(p.merge(FENCE_LANG, p.tokens_until_eol()));
    }
    while p.at(EOL) {
        children.push(p.bump());
        if p.at(EOL) {
            continue;
        }
        // a closing fence must be at least as long as the opener
        if p.at(fence) && p.current_len() >= open_len && rest_of_line_blank(p, 1) {
            children.push(p.bump());
            if p.at(WHITE_SPACE) {
                children.push(p.bump());
            }
            break;
        }
        if p.at_end() {
            break;
        }
        children.push(p.merge(CODE_FENCE_CONTENT, p.tokens_until_eol()));
    }
    MarkdownNode::node(CODE_FENCE, children)
}

fn list(p: &mut Parser, ordered: bool) -> MarkdownNode {
    let kind = if ordered { ORDERED_LIST } else { UNORDERED_LIST };
    let mut children = Vec::new();
    loop {
        children.push(list_item(p, ordered));
        let continues = p.at(EOL)
            && if ordered {
                at_ordered_bullet(p, 1)
            } else {
                at_bullet(p, 1)
            };
        if !continues {
            break;
        }
        children.push(p.bump());
    }
    MarkdownNode::node(kind, children)
}

fn list_item(p: &mut Parser, ordered: bool) -> MarkdownNode {
    let mut children = Vec::new();
    if ordered {
        // digits plus the `.` or `)` make one marker lexeme
        children.push(p.merge(LIST_NUMBER, 2));
    } else {
        children.push(p.bump());
    }
    children.push(p.bump()); // the whitespace the bullet predicate required
    if !matches!(p.current(), EOL | EOF) {
        let mut content = Vec::new();
        while !matches!(p.current(), EOL | EOF) {
            content.push(p.bump());
        }
        children.push(MarkdownNode::node(PARAGRAPH, content));
    }
    MarkdownNode::node(LIST_ITEM, children)
}

fn link_definition(p: &mut Parser) -> MarkdownNode {
    let mut i = 1;
    while p.nth(i) != RBRACKET {
        i += 1;
    }
    // brackets and label collapse into one lexeme
    let mut children = vec![p.merge(LINK_LABEL, i + 1)];
    children.push(p.bump()); // `:`
    if p.at(WHITE_SPACE) {
        children.push(p.bump());
    }
    let mut d = 0;
    while !matches!(p.nth(d), WHITE_SPACE | EOL | EOF) {
        d += 1;
    }
    children.push(p.merge(LINK_DESTINATION, d));
    if p.at(WHITE_SPACE) && p.nth(1) == DOUBLE_QUOTE {
        let mut j = 2;
        loop {
            match p.nth(j) {
                DOUBLE_QUOTE => {
                    children.push(p.bump());
                    children.push(p.merge(LINK_TITLE, j));
                    break;
                }
                EOL | EOF => break, // unterminated title, leave it outside
                _ => j += 1,
            }
        }
    }
    MarkdownNode::node(LINK_DEFINITION, children)
}

fn table(p: &mut Parser) -> MarkdownNode {
    let mut children = Vec::new();
    children.push(table_row(p, TABLE_HEADER));
    children.push(p.bump()); // EOL before the separator, guaranteed by at_table
    children.push(p.merge(TABLE_SEPARATOR, p.tokens_until_eol()));
    while p.at(EOL) && line_has_pipe(p, 1) {
        children.push(p.bump());
        children.push(table_row(p, TABLE_ROW));
    }
    MarkdownNode::node(TABLE, children)
}

fn table_row(p: &mut Parser, kind: MarkdownKind) -> MarkdownNode {
    let mut children = Vec::new();
    while !matches!(p.current(), EOL | EOF) {
        if p.at(PIPE) {
            children.push(p.bump());
            continue;
        }
        let mut cell = Vec::new();
        while !matches!(p.current(), EOL | EOF | PIPE) {
            cell.push(p.bump());
        }
        children.push(MarkdownNode::node(TABLE_CELL, cell));
    }
    MarkdownNode::node(kind, children)
}

fn paragraph_or_setext(p: &mut Parser) -> MarkdownNode {
    let mut children = Vec::new();
    while !matches!(p.current(), EOL | EOF) {
        children.push(p.bump());
    }
    loop {
        if p.at(EOL) && at_setext_underline(p, 1) {
            let kind = if p.nth(1) == EQ { SETEXT_1 } else { SETEXT_2 };
            let mut heading = vec![MarkdownNode::node(SETEXT_CONTENT, children)];
            heading.push(p.bump()); // EOL
            heading.push(p.merge(SETEXT_UNDERLINE, p.tokens_until_eol()));
            return MarkdownNode::node(kind, heading);
        }
        if !(p.at(EOL) && paragraph_continues(p)) {
            break;
        }
        children.push(p.bump());
        while !matches!(p.current(), EOL | EOF) {
            children.push(p.bump());
        }
    }
    MarkdownNode::node(PARAGRAPH, children)
}

#[cfg(test)]
mod tests {
    use crate::flavour::Flavour;
    use crate::grammar::parse;
    use crate::kind::MarkdownKind::*;
    use pretty_assertions::assert_eq;

    fn top_kinds(text: &str) -> Vec<crate::kind::MarkdownKind> {
        parse(&Flavour::gfm(), text)
            .children()
            .iter()
            .map(|c| c.kind())
            .collect()
    }

    #[test]
    fn empty_document() {
        let tree = parse(&Flavour::gfm(), "");
        assert_eq!(tree.kind(), DOCUMENT);
        assert_eq!(tree.range(), 0..0);
        assert!(tree.children().is_empty());
    }

    #[test]
    fn heading_then_paragraph() {
        let tree = parse(&Flavour::gfm(), "## Hello\n\nWorld");
        assert_eq!(
            tree.children().iter().map(|c| c.kind()).collect::<Vec<_>>(),
            vec![ATX_2, EOL, EOL, PARAGRAPH]
        );
        let heading = &tree.children()[0];
        assert_eq!(
            heading.children().iter().map(|c| c.kind()).collect::<Vec<_>>(),
            vec![HASH, WHITE_SPACE, ATX_CONTENT]
        );
        assert_eq!(heading.children()[0].range(), 0..2);
    }

    #[test]
    fn heading_without_space_is_a_paragraph() {
        assert_eq!(top_kinds("#nospace"), vec![PARAGRAPH]);
    }

    #[test]
    fn seven_hashes_is_a_paragraph() {
        assert_eq!(top_kinds("####### too deep"), vec![PARAGRAPH]);
    }

    #[test]
    fn document_spans_tile_the_buffer() {
        let text = "# H\n\n> quote\n\n- a\n- b\n\n1. one\n\n```rust\nfn x() {}\n```\n\n---\n\ntail";
        let tree = parse(&Flavour::gfm(), text);
        assert_eq!(tree.range(), 0..text.len());
        let mut offset = 0;
        for child in tree.children() {
            assert_eq!(child.start(), offset);
            offset = child.end();
        }
        assert_eq!(offset, text.len());
    }

    #[test]
    fn setext_heading_levels() {
        let one = parse(&Flavour::gfm(), "Title\n=====");
        assert_eq!(one.children()[0].kind(), SETEXT_1);
        let two = parse(&Flavour::gfm(), "Title\n-----");
        assert_eq!(two.children()[0].kind(), SETEXT_2);
        let kinds: Vec<_> = one.children()[0]
            .children()
            .iter()
            .map(|c| c.kind())
            .collect();
        assert_eq!(kinds, vec![SETEXT_CONTENT, EOL, SETEXT_UNDERLINE]);
    }

    #[test]
    fn thematic_break_needs_three_markers() {
        assert_eq!(top_kinds("---"), vec![THEMATIC_BREAK]);
        assert_eq!(top_kinds("- - -"), vec![THEMATIC_BREAK]);
        assert_eq!(top_kinds("***"), vec![THEMATIC_BREAK]);
        assert_eq!(top_kinds("--"), vec![PARAGRAPH]);
    }

    #[test]
    fn bullet_list_items() {
        let tree = parse(&Flavour::gfm(), "- one\n- two");
        assert_eq!(tree.children().len(), 1);
        let list = &tree.children()[0];
        assert_eq!(list.kind(), UNORDERED_LIST);
        let kinds: Vec<_> = list.children().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![LIST_ITEM, EOL, LIST_ITEM]);
    }

    #[test]
    fn ordered_marker_is_one_lexeme() {
        let tree = parse(&Flavour::gfm(), "1. one");
        let item = &tree.children()[0].children()[0];
        assert_eq!(item.kind(), LIST_ITEM);
        let marker = &item.children()[0];
        assert_eq!(marker.kind(), LIST_NUMBER);
        assert_eq!(marker.range(), 0..2);
        assert!(marker.is_leaf());
    }

    #[test]
    fn fenced_code_with_info_string() {
        let text = "```rust\nfn main() {}\n```";
        let tree = parse(&Flavour::gfm(), text);
        let fence = &tree.children()[0];
        assert_eq!(fence.kind(), CODE_FENCE);
        let kinds: Vec<_> = fence.children().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![BACKTICK, FENCE_LANG, EOL, CODE_FENCE_CONTENT, EOL, BACKTICK]
        );
        assert_eq!(fence.children()[1].text(text), "rust");
        assert_eq!(fence.children()[3].text(text), "fn main() {}");
    }

    #[test]
    fn unclosed_fence_runs_to_end_of_input() {
        let tree = parse(&Flavour::gfm(), "```\ncode");
        let fence = &tree.children()[0];
        assert_eq!(fence.kind(), CODE_FENCE);
        assert_eq!(fence.end(), 8);
    }

    #[test]
    fn block_quote_wraps_its_lines() {
        let text = "> first\n> second";
        let tree = parse(&Flavour::gfm(), text);
        let quote = &tree.children()[0];
        assert_eq!(quote.kind(), BLOCK_QUOTE);
        let kinds: Vec<_> = quote.children().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![GT, WHITE_SPACE, PARAGRAPH, EOL, GT, WHITE_SPACE, PARAGRAPH]
        );
    }

    #[test]
    fn pipe_table_rows_and_cells() {
        let text = "| a | b |\n| --- | --- |\n| c | d |";
        let tree = parse(&Flavour::gfm(), text);
        let table = &tree.children()[0];
        assert_eq!(table.kind(), TABLE);
        let kinds: Vec<_> = table.children().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![TABLE_HEADER, EOL, TABLE_SEPARATOR, EOL, TABLE_ROW]
        );
        let header = &table.children()[0];
        let cells = header
            .children()
            .iter()
            .filter(|c| c.kind() == TABLE_CELL)
            .count();
        assert_eq!(cells, 2);
        let row = table.children().last().unwrap();
        let cells = row
            .children()
            .iter()
            .filter(|c| c.kind() == TABLE_CELL)
            .count();
        assert_eq!(cells, 2);
    }

    #[test]
    fn tables_disabled_by_flavour() {
        let text = "| a | b |\n| --- | --- |";
        let tree = parse(&Flavour::commonmark(), text);
        assert!(tree.descendants().all(|n| n.kind() != TABLE));
    }

    #[test]
    fn link_definition_merges_label_destination_title() {
        let text = "[ref]: /url \"title\"";
        let tree = parse(&Flavour::gfm(), text);
        let def = &tree.children()[0];
        assert_eq!(def.kind(), LINK_DEFINITION);
        let kinds: Vec<_> = def.children().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                LINK_LABEL,
                COLON,
                WHITE_SPACE,
                LINK_DESTINATION,
                WHITE_SPACE,
                LINK_TITLE
            ]
        );
        assert_eq!(def.children()[0].text(text), "[ref]");
        assert_eq!(def.children()[3].text(text), "/url");
        assert_eq!(def.children()[5].text(text), "\"title\"");
        assert!(def.children().iter().all(|c| c.is_leaf()));
    }

    #[test]
    fn bracket_without_colon_stays_a_paragraph() {
        assert_eq!(top_kinds("[not a definition]"), vec![PARAGRAPH]);
    }

    #[test]
    fn paragraph_keeps_inline_tokens_raw() {
        let tree = parse(&Flavour::gfm(), "**bold**");
        let para = &tree.children()[0];
        assert_eq!(para.kind(), PARAGRAPH);
        let kinds: Vec<_> = para.children().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![STAR, TEXT, STAR]);
        assert_eq!(para.children()[0].range(), 0..2);
    }

    #[test]
    fn lazy_continuation_joins_paragraph_lines() {
        let tree = parse(&Flavour::gfm(), "first\nsecond");
        assert_eq!(
            tree.children().iter().map(|c| c.kind()).collect::<Vec<_>>(),
            vec![PARAGRAPH]
        );
    }

    #[test]
    fn heading_interrupts_paragraph() {
        assert_eq!(top_kinds("text\n# h"), vec![PARAGRAPH, EOL, ATX_1]);
    }
}
