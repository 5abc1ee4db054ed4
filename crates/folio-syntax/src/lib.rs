//! # folio-syntax
//!
//! Tokenizer, parser and document tree for folio wiki markup, using
//! [Logos] for lexing and a hand-written recursive descent parser.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Architecture Overview
//!
//! The pipeline has two stages:
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Node tree
//!               (Logos)          (Grammar)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! The lexer turns source into a lazy stream of [`Token`]s. Block markers
//! (`#`, list bullets, `||` rows) are only recognised at the start of a line;
//! everything that isn't markup coalesces into `Text`.
//!
//! ```text
//! "# Hello\n" → [HeadingMarker(1) "# ", Text "Hello", Newline, EndOfInput]
//! ```
//!
//! ### 2. Parser ([`parser`] module)
//!
//! The parser pulls tokens one at a time and builds an owned [`Node`] tree.
//! Grammar rules live in `parser::grammar`. Parsing never fails: markup
//! that doesn't close is kept as literal text.
//!
//! ## Markup
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `# Title` | Heading, `#` count is the level (capped at 6) |
//! | `- item`, `1. item` | List item, indentation gives nesting |
//! | `\|\|a\|\|b\|\|` | Table row |
//! | `*em*`, `**strong**` | Emphasis |
//! | `[[Cat/Page\|label]]` | Link |
//! | `{{Cat/Page}}` | Transclusion |
//! | `@@raw@@` | Verbatim text |
//! | `\*` | Escaped markup character |
//!
//! ## Quick Start
//!
//! ```
//! use folio_syntax::{parse, Node};
//!
//! let doc = parse("See [[Help/Editing|the guide]].");
//! let Node::Document { children } = &doc else { unreachable!() };
//! assert_eq!(children.len(), 1);
//! assert_eq!(doc.plain_text(), "See the guide.");
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{ArticleRef, DEFAULT_CATEGORY, Node};
pub use lexer::{Token, TokenKind, Tokenizer, tokenize};
pub use parser::{ParseOptions, Parser, parse, parse_with};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    /// Helper to format a document tree for snapshot testing.
    fn format_tree(node: &Node, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        let label = match node {
            Node::Document { .. } => "Document".to_string(),
            Node::Paragraph { .. } => "Paragraph".to_string(),
            Node::Text { text } => format!("Text {text:?}"),
            Node::Emphasis { strong: true, .. } => "Strong".to_string(),
            Node::Emphasis { strong: false, .. } => "Emphasis".to_string(),
            Node::Heading { level, .. } => format!("Heading({level})"),
            Node::ListBlock { ordered: true, .. } => "OrderedList".to_string(),
            Node::ListBlock { ordered: false, .. } => "BulletList".to_string(),
            Node::ListItem { .. } => "ListItem".to_string(),
            Node::Table { .. } => "Table".to_string(),
            Node::TableRow { .. } => "TableRow".to_string(),
            Node::TableCell { .. } => "TableCell".to_string(),
            Node::Link { target, .. } => format!("Link -> {target}"),
            Node::Transclusion { target } => format!("Transclusion {target}"),
        };

        let mut result = format!("{prefix}{label}\n");
        for child in node.children() {
            result.push_str(&format_tree(child, indent + 1));
        }
        result
    }

    #[test]
    fn snapshot_heading_and_paragraph() {
        let doc = parse("# Hello\nworld\n");
        assert_snapshot!(format_tree(&doc, 0), @r#"
        Document
          Heading(1)
            Text "Hello"
          Paragraph
            Text "world"
        "#);
    }

    #[test]
    fn snapshot_complex_document() {
        let input = r#"# Main Title

This is a paragraph with [[wikilinks]] and **strong** text.

## Lists

- First item
- Second with [[Help/Editing|help]]
  1. nested one
  2. nested two
- Third

||Name||Value||
||a||*b*||

{{Shared/Footer}}
"#;
        let doc = parse(input);
        assert_snapshot!(format_tree(&doc, 0), @r#"
        Document
          Heading(1)
            Text "Main Title"
          Paragraph
            Text "This is a paragraph with "
            Link -> wikilinks
              Text "wikilinks"
            Text " and "
            Strong
              Text "strong"
            Text " text."
          Heading(2)
            Text "Lists"
          BulletList
            ListItem
              Text "First item"
            ListItem
              Text "Second with "
              Link -> Help/Editing
                Text "help"
              OrderedList
                ListItem
                  Text "nested one"
                ListItem
                  Text "nested two"
            ListItem
              Text "Third"
          Table
            TableRow
              TableCell
                Text "Name"
              TableCell
                Text "Value"
            TableRow
              TableCell
                Text "a"
              TableCell
                Emphasis
                  Text "b"
          Transclusion Shared/Footer
        "#);
    }

    // === Error tolerance / messy input tests ===
    // Half-finished edits must still give a usable tree.

    #[test]
    fn snapshot_messy_unclosed_constructs() {
        let input = r#"# Draft notes

Check out [[this page for more info

Some *half done emphasis
and **strong across
lines**

Stray ]] and }} and |pipes|
"#;
        let doc = parse(input);
        assert_snapshot!(format_tree(&doc, 0), @r#"
        Document
          Heading(1)
            Text "Draft notes"
          Paragraph
            Text "Check out [[this page for more info"
          Paragraph
            Text "Some *half done emphasis\nand "
            Strong
              Text "strong across\nlines"
          Paragraph
            Text "Stray ]] and }} and |pipes|"
        "#);
    }

    #[test]
    fn tree_dumps_as_json() {
        let doc = parse("{{Cat/Page}}");
        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"type":"document","children":[{"type":"transclusion","target":{"category":"Cat","name":"Page"}}]}"#
        );
    }

    #[test]
    fn reparse_is_identical() {
        let input = "# T\n- a\n  - b\n||x||y||\n**c** [[D|e]]";
        assert_eq!(parse(input), parse(input));
    }
}
