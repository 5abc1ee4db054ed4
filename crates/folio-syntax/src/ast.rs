//! # AST - The Document Tree
//!
//! The parser produces a tree of [`Node`]s rooted at a single
//! [`Node::Document`]. Every non-leaf variant owns its children in source
//! order; there are no back-pointers, so the tree is acyclic by construction.
//!
//! The node set is closed on purpose: renderers `match` over it exhaustively,
//! so adding a variant is a compile error everywhere it needs handling.
//!
//! ```
//! use folio_syntax::{parse, Node};
//!
//! let doc = parse("# Title\nbody");
//! let Node::Document { children } = &doc else { unreachable!() };
//! assert!(matches!(children[0], Node::Heading { level: 1, .. }));
//! assert!(matches!(children[1], Node::Paragraph { .. }));
//! ```
//!
//! Nodes serialize with serde (internally tagged by `type`) so a parsed tree
//! can be dumped for debugging with [`Node::to_json`].

use std::fmt;

use serde::Serialize;

/// Category used when a reference names no category (`[[Page]]`).
pub const DEFAULT_CATEGORY: &str = "_default";

/// Address of an article: a category plus a name within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ArticleRef {
    pub category: String,
    pub name: String,
}

impl ArticleRef {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }

    /// Reference in the default category.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(DEFAULT_CATEGORY, name)
    }

    /// Parse reference syntax: `Name` or `Category/Name`.
    ///
    /// Only the first `/` splits; the rest belongs to the name. Returns `None`
    /// when the name, or an explicitly given category, is blank.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (category, name) = match raw.split_once('/') {
            Some((category, name)) => (category.trim(), name.trim()),
            None => (DEFAULT_CATEGORY, raw),
        };

        if category.is_empty() || name.is_empty() {
            return None;
        }

        Some(Self::new(category, name))
    }

    pub fn is_default_category(&self) -> bool {
        self.category == DEFAULT_CATEGORY
    }

    /// Path a link to this article points at.
    pub fn href(&self) -> String {
        if self.is_default_category() {
            format!("/{}", self.name)
        } else {
            format!("/{}/{}", self.category, self.name)
        }
    }
}

impl fmt::Display for ArticleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default_category() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.category, self.name)
        }
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// The root. Children are block nodes.
    Document { children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    /// Literal text, unescaped. Escaping is the renderer's job.
    Text { text: String },
    Emphasis { strong: bool, children: Vec<Node> },
    Heading { level: u8, children: Vec<Node> },
    /// Children are [`Node::ListItem`]s.
    ListBlock { ordered: bool, children: Vec<Node> },
    /// Inline content, optionally followed by nested [`Node::ListBlock`]s.
    ListItem { children: Vec<Node> },
    /// Children are [`Node::TableRow`]s.
    Table { children: Vec<Node> },
    /// Children are [`Node::TableCell`]s.
    TableRow { children: Vec<Node> },
    TableCell { children: Vec<Node> },
    /// Reference to another article. `children` is the label.
    Link {
        target: ArticleRef,
        children: Vec<Node>,
    },
    /// Another article's content embedded at render time.
    Transclusion { target: ArticleRef },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Child nodes, empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children }
            | Node::Paragraph { children }
            | Node::Emphasis { children, .. }
            | Node::Heading { children, .. }
            | Node::ListBlock { children, .. }
            | Node::ListItem { children }
            | Node::Table { children }
            | Node::TableRow { children }
            | Node::TableCell { children }
            | Node::Link { children, .. } => children,
            Node::Text { .. } | Node::Transclusion { .. } => &[],
        }
    }

    /// Concatenated text of all `Text` leaves below this node.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { text } => out.push_str(text),
            other => {
                for child in other.children() {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Every transclusion target in the tree, in document order.
    pub fn transclusions(&self) -> Vec<&ArticleRef> {
        let mut targets = Vec::new();
        self.collect_transclusions(&mut targets);
        targets
    }

    fn collect_transclusions<'n>(&'n self, targets: &mut Vec<&'n ArticleRef>) {
        match self {
            Node::Transclusion { target } => targets.push(target),
            other => {
                for child in other.children() {
                    child.collect_transclusions(targets);
                }
            }
        }
    }

    /// Serialize the tree as JSON for debugging.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Append text to a node list, merging with a trailing `Text` sibling.
pub(crate) fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text { text: last }) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::text(text));
    }
}

/// Append nodes, merging adjacent text at the seam.
pub(crate) fn extend_nodes(nodes: &mut Vec<Node>, more: Vec<Node>) {
    for node in more {
        match node {
            Node::Text { text } => push_text(nodes, &text),
            other => nodes.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Cat/Name", Some(ArticleRef::new("Cat", "Name")))]
    #[case("Name", Some(ArticleRef::named("Name")))]
    #[case("  Cat / Name  ", Some(ArticleRef::new("Cat", "Name")))]
    #[case("Cat/sub/page", Some(ArticleRef::new("Cat", "sub/page")))]
    #[case("", None)]
    #[case("   ", None)]
    #[case("Cat/", None)]
    #[case("/Name", None)]
    fn parse_article_ref(#[case] raw: &str, #[case] expected: Option<ArticleRef>) {
        assert_eq!(ArticleRef::parse(raw), expected);
    }

    #[test]
    fn display_hides_default_category() {
        assert_eq!(ArticleRef::named("Home").to_string(), "Home");
        assert_eq!(ArticleRef::new("Cat", "Name").to_string(), "Cat/Name");
    }

    #[test]
    fn href_for_default_and_named_category() {
        assert_eq!(ArticleRef::named("Home").href(), "/Home");
        assert_eq!(ArticleRef::new("Cat", "Name").href(), "/Cat/Name");
    }

    #[test]
    fn push_text_merges_adjacent_text() {
        let mut nodes = vec![Node::text("a")];
        push_text(&mut nodes, "b");
        push_text(&mut nodes, "");
        assert_eq!(nodes, vec![Node::text("ab")]);
    }

    #[test]
    fn extend_nodes_merges_at_the_seam_only() {
        let mut nodes = vec![Node::text("[[")];
        extend_nodes(
            &mut nodes,
            vec![
                Node::text("x"),
                Node::Transclusion {
                    target: ArticleRef::named("A"),
                },
                Node::text("y"),
            ],
        );
        assert_eq!(
            nodes,
            vec![
                Node::text("[[x"),
                Node::Transclusion {
                    target: ArticleRef::named("A"),
                },
                Node::text("y"),
            ]
        );
    }

    #[test]
    fn plain_text_walks_nested_children() {
        let node = Node::Paragraph {
            children: vec![
                Node::text("a "),
                Node::Emphasis {
                    strong: true,
                    children: vec![Node::text("b")],
                },
            ],
        };
        assert_eq!(node.plain_text(), "a b");
    }

    #[test]
    fn transclusions_in_document_order() {
        let doc = crate::parser::parse("{{A}}\n\n- x {{Cat/B}}\n||{{C}}||");
        assert_eq!(
            doc.transclusions(),
            vec![
                &ArticleRef::named("A"),
                &ArticleRef::new("Cat", "B"),
                &ArticleRef::named("C"),
            ]
        );
    }

    #[test]
    fn json_is_tagged_by_type() {
        let node = Node::Heading {
            level: 2,
            children: vec![Node::text("Hi")],
        };
        assert_eq!(
            node.to_json().unwrap(),
            r#"{"type":"heading","level":2,"children":[{"type":"text","text":"Hi"}]}"#
        );
    }
}
