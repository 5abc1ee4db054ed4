//! # Grammar Rules
//!
//! This module contains the grammar rules that drive parsing. Each function
//! takes a `&mut Parser` and uses its methods to:
//!
//! 1. Inspect the current token (`p.current()`, `p.at()`)
//! 2. Consume tokens (`p.bump()`, `p.eat()`)
//! 3. Return the [`Node`]s it built to its caller
//!
//! ## Module Structure
//!
//! - [`block`] - Block-level elements (headings, lists, tables, paragraphs)
//! - [`inline`] - Inline elements (emphasis, links, transclusions)
//!
//! ## Precedence
//!
//! Block recognition happens first, at the start of each logical line. If no
//! block marker matches, the line opens a paragraph, which keeps absorbing
//! lines until a blank line or a line that does start with a block marker.
//! Inside a block, inline rules take over.
//!
//! ## Error Recovery
//!
//! Grammar functions never fail. When something does not close, the rule
//! gives back its opening marker as text plus whatever it parsed, and the
//! caller carries on.

mod block;
mod inline;

use crate::ast::Node;
use crate::parser::Parser;

/// Parse the root document.
///
/// This is the entry point for parsing. It creates a Document node containing
/// all top-level blocks.
pub fn root(p: &mut Parser<'_>) -> Node {
    let mut children = Vec::new();

    while !p.at_end() {
        if let Some(node) = block::block(p) {
            children.push(node);
        }
    }

    Node::Document { children }
}
