//! # Parser - Recursive Descent over a Token Cursor
//!
//! This module turns the token stream into a [`Node::Document`] tree.
//!
//! ## The Cursor
//!
//! The parser never sees the whole token list. It reads through a
//! [`TokenCursor`], which holds exactly one token of lookahead over the lazy
//! [`Tokenizer`]:
//!
//! - `current()` / `at()` - inspect the lookahead token
//! - `bump()` - consume it and pull the next one
//! - `eat()` - consume only if it matches
//!
//! Every grammar rule is an ordinary function taking `&mut Parser`. Because
//! markers like `[[` and `**` are single tokens, one token of lookahead is
//! enough for the whole grammar.
//!
//! ## Fail-Soft
//!
//! Parsing never fails. A construct that cannot be closed (an opened `**`
//! never closed, a `[[` without `]]`) is emitted as its literal marker text,
//! followed by whatever was parsed inside it. The result is always a single
//! `Document`.
//!
//! ## Bounded Nesting
//!
//! Inline constructs and lists nest recursively. [`ParseOptions::max_depth`]
//! caps that nesting; a marker that would go deeper is kept as literal text,
//! so malicious input cannot exhaust the stack.
//!
//! ```
//! use folio_syntax::parse;
//!
//! let doc = parse("**never closed");
//! assert_eq!(doc.plain_text(), "**never closed");
//! ```
//!
//! ## Module Structure
//!
//! - [`grammar`] - Grammar rules (root, block, inline)

mod grammar;

use crate::ast::Node;
use crate::lexer::{Token, TokenKind, Tokenizer, tokenize};

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of inline constructs, and of lists.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 32;
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// One-token lookahead over a lazy token stream.
pub struct TokenCursor<'a> {
    tokens: Tokenizer<'a>,
    current: Token<'a>,
}

impl<'a> TokenCursor<'a> {
    pub fn new(mut tokens: Tokenizer<'a>) -> Self {
        let current = tokens.next().unwrap_or_else(Token::end_of_input);
        Self { tokens, current }
    }

    /// The lookahead token. Stays at `EndOfInput` once reached.
    pub fn peek(&self) -> Token<'a> {
        self.current
    }

    /// Consume the lookahead token and return it.
    pub fn advance(&mut self) -> Token<'a> {
        let next = self.tokens.next().unwrap_or_else(Token::end_of_input);
        std::mem::replace(&mut self.current, next)
    }
}

/// How far inline content may run before the enclosing block ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Until the end of the line (headings, list items, table cells).
    Line,
    /// Across soft line breaks, until a blank line or a block marker.
    Paragraph,
}

/// The parser state machine.
///
/// Holds the token cursor plus the little state grammar rules share:
/// current nesting depth and what kind of block is being filled.
pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    options: ParseOptions,
    pub(crate) depth: usize,
    pub(crate) mode: Mode,
    /// Inside a table cell: `||` ends inline content.
    pub(crate) in_cell: bool,
    /// Inside a link label: `]]` ends inline content, links don't nest.
    pub(crate) in_label: bool,
    /// Set once a paragraph's terminating line break has been consumed.
    pub(crate) block_done: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Tokenizer<'a>, options: ParseOptions) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            options,
            depth: 0,
            mode: Mode::Paragraph,
            in_cell: false,
            in_label: false,
            block_done: false,
        }
    }

    /// Parse the tokens into a document.
    pub fn parse(mut self) -> Node {
        grammar::root(&mut self)
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Current token kind.
    pub fn current(&self) -> TokenKind {
        self.cursor.peek().kind
    }

    /// Text of the current token.
    pub fn current_text(&self) -> &'a str {
        self.cursor.peek().text
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.at(TokenKind::EndOfInput)
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) -> Token<'a> {
        self.cursor.advance()
    }

    /// Whether another level of nesting is allowed.
    pub(crate) fn can_nest(&self, depth: usize) -> bool {
        depth < self.options.max_depth
    }

    /// Run `f` with a different inline mode, restoring the old one after.
    pub(crate) fn with_mode<T>(&mut self, mode: Mode, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.mode, mode);
        let result = f(self);
        self.mode = saved;
        result
    }
}

/// Parse wiki source into a document tree.
pub fn parse(source: &str) -> Node {
    parse_with(source, ParseOptions::default())
}

/// Parse with explicit limits.
pub fn parse_with(source: &str, options: ParseOptions) -> Node {
    Parser::new(tokenize(source), options).parse()
}
