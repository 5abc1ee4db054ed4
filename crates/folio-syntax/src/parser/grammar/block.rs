//! Block-level grammar rules.

use crate::ast::{Node, extend_nodes, push_text};
use crate::lexer::TokenKind;
use crate::parser::{Mode, Parser};

use super::inline;

/// Parse a block element. Returns `None` for blocks with nothing in them.
pub(super) fn block(p: &mut Parser<'_>) -> Option<Node> {
    // Skip leading blank lines
    while p.eat(TokenKind::Newline) {}

    match p.current() {
        TokenKind::EndOfInput => None,
        TokenKind::HeadingMarker { level } => Some(heading(p, level)),
        TokenKind::ListMarker { level, ordered } => Some(list(p, level, ordered, 0)),
        TokenKind::TableRowSeparator => Some(table(p)),
        _ => paragraph(p),
    }
}

/// Parse a heading: # Title
fn heading(p: &mut Parser<'_>, level: u8) -> Node {
    p.bump();
    let children = line(p);
    Node::Heading { level, children }
}

/// The rest of the current line as trimmed inline content.
fn line(p: &mut Parser<'_>) -> Vec<Node> {
    let children = trim(p.with_mode(Mode::Line, inline::inline_content));
    p.eat(TokenKind::Newline);
    children
}

/// Parse consecutive items at `level` and of the same kind.
///
/// Deeper markers after an item open nested lists inside it. When nesting
/// is exhausted the deeper line is appended to the item instead, marker
/// included.
fn list(p: &mut Parser<'_>, level: u8, ordered: bool, nesting: usize) -> Node {
    let mut items = Vec::new();

    while let TokenKind::ListMarker {
        level: item_level,
        ordered: item_ordered,
    } = p.current()
    {
        if item_level != level || item_ordered != ordered {
            break;
        }

        p.bump();
        let mut children = line(p);

        while let TokenKind::ListMarker {
            level: deeper,
            ordered: kind,
        } = p.current()
        {
            if deeper <= level {
                break;
            }

            if p.can_nest(nesting + 1) {
                children.push(list(p, deeper, kind, nesting + 1));
            } else {
                let marker = p.bump();
                push_text(&mut children, " ");
                push_text(&mut children, marker.text.trim_start());
                extend_nodes(&mut children, line(p));
            }
        }

        items.push(Node::ListItem { children });
    }

    Node::ListBlock {
        ordered,
        children: items,
    }
}

/// Parse consecutive table rows.
fn table(p: &mut Parser<'_>) -> Node {
    let mut rows = Vec::new();
    while p.at(TokenKind::TableRowSeparator) {
        rows.push(row(p));
    }
    Node::Table { children: rows }
}

/// Parse one row: ||a||b||
fn row(p: &mut Parser<'_>) -> Node {
    p.bump();
    p.in_cell = true;

    let mut cells = Vec::new();
    loop {
        let children = trim(p.with_mode(Mode::Line, inline::inline_content));
        let separated = p.eat(TokenKind::TableCellSeparator);

        // A blank cell after the last separator is just the line end
        if separated || !children.is_empty() {
            cells.push(Node::TableCell { children });
        }
        if !separated {
            break;
        }
    }

    p.in_cell = false;
    p.eat(TokenKind::Newline);
    Node::TableRow { children: cells }
}

/// Parse a paragraph (fallback block type).
fn paragraph(p: &mut Parser<'_>) -> Option<Node> {
    p.block_done = false;
    let children = p.with_mode(Mode::Paragraph, inline::inline_content);
    p.block_done = false;

    let mut children = trim(children);
    if children.is_empty() {
        return None;
    }

    // {{Page}} on its own is a block-level transclusion
    if children.len() == 1 && matches!(children[0], Node::Transclusion { .. }) {
        return children.pop();
    }

    Some(Node::Paragraph { children })
}

/// Trim leading whitespace of the first text node and trailing whitespace
/// of the last, dropping them if nothing is left.
fn trim(mut nodes: Vec<Node>) -> Vec<Node> {
    if let Some(Node::Text { text }) = nodes.first_mut() {
        let start = text.len() - text.trim_start().len();
        text.drain(..start);
        if text.is_empty() {
            nodes.remove(0);
        }
    }

    if let Some(Node::Text { text }) = nodes.last_mut() {
        let end = text.trim_end().len();
        text.truncate(end);
        if text.is_empty() {
            nodes.pop();
        }
    }

    nodes
}
