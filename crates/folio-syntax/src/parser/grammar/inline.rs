//! # Inline-Level Grammar
//!
//! Inline elements are the formatting within blocks: emphasis, links and
//! transclusions. Unlike blocks, inline parsing is driven by marker tokens
//! rather than line-start patterns.
//!
//! ## Dispatch Logic
//!
//! | Token | Element |
//! |-------|---------|
//! | `*` / `**` | Emphasis / strong emphasis |
//! | `[[` | Link, `[[target]]` or `[[target\|label]]` |
//! | `{{` | Transclusion, `{{target}}` |
//! | `@@` | Raw text, markup inside is not interpreted |
//! | (other) | Plain text |
//!
//! ## Where Inline Content Stops
//!
//! Inline content never crosses a block boundary. Depending on the block
//! being filled, the boundary is the end of the line (headings, list items),
//! a `||` (table cells), or a blank line / block marker (paragraphs). Inside
//! a link label `]]` and the end of the line also stop it.
//!
//! ## Error Tolerance
//!
//! - Unclosed `*`/`**` gives back the marker as text, then its content
//! - Unclosed `[[` / `{{` gives back everything it consumed as text
//! - A link or transclusion whose target is blank is literal text
//! - Markers with no meaning here (`]]`, `|`, `}}`) are plain text

use crate::ast::{ArticleRef, Node, extend_nodes, push_text};
use crate::lexer::TokenKind;
use crate::parser::{Mode, Parser};

/// What ends a nested inline sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closer {
    Emphasis { strong: bool },
    Label,
}

/// Parse inline content until the enclosing block ends.
///
/// This is the entry point called by block parsers.
pub fn inline_content(p: &mut Parser<'_>) -> Vec<Node> {
    let (nodes, _) = inlines(p, None);
    nodes
}

/// Parse inline content until the block ends or `closer` is consumed.
///
/// Returns the parsed nodes and whether the closer was found.
fn inlines(p: &mut Parser<'_>, closer: Option<Closer>) -> (Vec<Node>, bool) {
    let mut nodes = Vec::new();

    loop {
        if let Some(closer) = closer
            && closes(p, closer)
        {
            p.bump();
            return (nodes, true);
        }

        if at_boundary(p) {
            return (nodes, false);
        }

        match p.current() {
            TokenKind::EmphasisMarker { strong } => emphasis(p, strong, &mut nodes),
            TokenKind::LinkOpen if !p.in_label => link(p, &mut nodes),
            TokenKind::TransclusionOpen if !p.in_label => transclusion(p, &mut nodes),
            TokenKind::RawText => {
                let raw = p.bump();
                push_text(&mut nodes, raw_inner(raw.text));
            }
            TokenKind::Newline => soft_break(p, &mut nodes),
            _ => {
                // Plain text, or a marker with no meaning here
                let token = p.bump();
                push_text(&mut nodes, token.text);
            }
        }
    }
}

fn closes(p: &Parser<'_>, closer: Closer) -> bool {
    match closer {
        Closer::Emphasis { strong } => p.at(TokenKind::EmphasisMarker { strong }),
        Closer::Label => p.at(TokenKind::LinkClose),
    }
}

/// Check whether the enclosing block (or label, or cell) ends here.
fn at_boundary(p: &Parser<'_>) -> bool {
    p.block_done
        || p.at_end()
        || (p.at(TokenKind::Newline) && (p.mode == Mode::Line || p.in_label))
        || (p.in_cell && p.at(TokenKind::TableCellSeparator))
        || (p.in_label && p.at(TokenKind::LinkClose))
}

/// A line break inside a paragraph: either a soft break or the paragraph end.
fn soft_break(p: &mut Parser<'_>, nodes: &mut Vec<Node>) {
    p.bump();

    if p.at_end() || p.at(TokenKind::Newline) || p.current().is_block_marker() {
        p.block_done = true;
    } else {
        push_text(nodes, "\n");
    }
}

/// Strip the `@@` delimiters from a raw text token.
fn raw_inner(text: &str) -> &str {
    text.strip_prefix("@@")
        .and_then(|inner| inner.strip_suffix("@@"))
        .unwrap_or(text)
}

/// Parse emphasis *text* or strong **text**.
fn emphasis(p: &mut Parser<'_>, strong: bool, nodes: &mut Vec<Node>) {
    let marker = p.bump();

    if !p.can_nest(p.depth) {
        push_text(nodes, marker.text);
        return;
    }

    p.depth += 1;
    let (children, closed) = inlines(p, Some(Closer::Emphasis { strong }));
    p.depth -= 1;

    if closed && !children.is_empty() {
        nodes.push(Node::Emphasis { strong, children });
        return;
    }

    // Unclosed (or empty): the markers are just text
    push_text(nodes, marker.text);
    extend_nodes(nodes, children);
    if closed {
        push_text(nodes, marker.text);
    }
}

/// Parse a link: [[target]] or [[target|label]]
fn link(p: &mut Parser<'_>, nodes: &mut Vec<Node>) {
    let open = p.bump();

    if !p.can_nest(p.depth) {
        push_text(nodes, open.text);
        return;
    }

    // The target is atomic: collect token text verbatim until `]]` or `|`
    let mut raw = String::new();
    loop {
        if at_boundary(p) || p.at(TokenKind::Newline) {
            push_text(nodes, open.text);
            push_text(nodes, &raw);
            return;
        }

        match p.current() {
            TokenKind::LinkClose => {
                let close = p.bump();
                match ArticleRef::parse(&raw) {
                    Some(target) => nodes.push(Node::Link {
                        target,
                        children: vec![Node::text(raw.trim())],
                    }),
                    None => {
                        push_text(nodes, open.text);
                        push_text(nodes, &raw);
                        push_text(nodes, close.text);
                    }
                }
                return;
            }
            TokenKind::LinkSeparator => {
                let separator = p.bump();
                link_label(p, open.text, &raw, separator.text, nodes);
                return;
            }
            _ => raw.push_str(p.bump().text),
        }
    }
}

/// Parse the label after `[[target|`, up to and including `]]`.
fn link_label(p: &mut Parser<'_>, open: &str, raw: &str, separator: &str, nodes: &mut Vec<Node>) {
    p.depth += 1;
    p.in_label = true;
    let (children, closed) = inlines(p, Some(Closer::Label));
    p.in_label = false;
    p.depth -= 1;

    if closed && let Some(target) = ArticleRef::parse(raw) {
        let children = if children.is_empty() {
            vec![Node::text(raw.trim())]
        } else {
            children
        };
        nodes.push(Node::Link { target, children });
        return;
    }

    push_text(nodes, open);
    push_text(nodes, raw);
    push_text(nodes, separator);
    extend_nodes(nodes, children);
    if closed {
        push_text(nodes, "]]");
    }
}

/// Parse a transclusion: {{target}}
fn transclusion(p: &mut Parser<'_>, nodes: &mut Vec<Node>) {
    let open = p.bump();

    let mut raw = String::new();
    loop {
        if at_boundary(p) || p.at(TokenKind::Newline) {
            push_text(nodes, open.text);
            push_text(nodes, &raw);
            return;
        }

        if p.at(TokenKind::TransclusionClose) {
            let close = p.bump();
            match ArticleRef::parse(&raw) {
                Some(target) => nodes.push(Node::Transclusion { target }),
                None => {
                    push_text(nodes, open.text);
                    push_text(nodes, &raw);
                    push_text(nodes, close.text);
                }
            }
            return;
        }

        raw.push_str(p.bump().text);
    }
}
