//! # Lexer - Tokenizing Wiki Source
//!
//! First stage of the pipeline: break source text into [`Token`]s using the
//! [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Two Lexeme Sets
//!
//! Most markup is context-free (`**`, `[[`, `{{`, `|`, ...) and is matched by
//! the [`Inline`] lexeme set. Block markers only mean something at the start
//! of a line, so at each line start the tokenizer *probes* with a second
//! lexeme set, [`LineStart`], by morphing a clone of the Logos lexer. If the
//! probe matches, the morphed lexer replaces ours; if not, the probe is
//! thrown away and inline lexing continues from the same position.
//!
//! ```text
//! "## Title\n- item"  →  [HeadingMarker(2) "## ", Text "Title", Newline,
//!                         ListMarker(1) "- ", Text "item", EndOfInput]
//! ```
//!
//! ## Fail-Soft
//!
//! Tokenizing never fails. Logos errors (bytes no lexeme accepts, such as a
//! lone `[`) become `Text`, exactly like markers that show up where they have
//! no meaning (`||` outside a table row). Adjacent text pieces coalesce, so a
//! run of plain characters is one token.
//!
//! ## Reconstruction
//!
//! Each token's `text` is a slice of the source. Concatenating them gives the
//! source back, minus the backslash of every escape sequence:
//!
//! ```
//! use folio_syntax::lexer::lex;
//!
//! let input = "**bold** and [[Cat/Name|label]]";
//! let reconstructed: String = lex(input).iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Laziness
//!
//! [`Tokenizer`] is an iterator; the parser pulls tokens one at a time. It is
//! cheap to clone, and [`tokenize`] can always be called again on the same
//! source to restart from scratch.

use logos::Logos;

/// Heading levels above this are clamped.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Token kinds seen by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Plain text, including escaped characters and downgraded markers.
    Text,
    /// `@@...@@` verbatim span. The text includes both delimiters.
    RawText,
    /// `**` when strong, `*` otherwise.
    EmphasisMarker { strong: bool },
    /// `#` run plus trailing blanks at line start.
    HeadingMarker { level: u8 },
    /// Indentation, bullet or `N.` marker, trailing blanks, at line start.
    ListMarker { level: u8, ordered: bool },
    /// `||` beginning a line.
    TableRowSeparator,
    /// `||` inside a table row.
    TableCellSeparator,
    /// `[[`
    LinkOpen,
    /// `]]`
    LinkClose,
    /// `|` between a link target and its label.
    LinkSeparator,
    /// `{{`
    TransclusionOpen,
    /// `}}`
    TransclusionClose,
    /// `\n` or `\r\n`
    Newline,
    /// Emitted exactly once, with empty text.
    EndOfInput,
}

impl TokenKind {
    /// Whether this kind can only appear at the start of a line.
    pub fn is_block_marker(self) -> bool {
        matches!(
            self,
            TokenKind::HeadingMarker { .. }
                | TokenKind::ListMarker { .. }
                | TokenKind::TableRowSeparator
        )
    }
}

/// A token with its kind and source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }

    pub fn end_of_input() -> Self {
        Self::new(TokenKind::EndOfInput, "")
    }
}

/// Lexemes valid anywhere on a line.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Inline {
    /// Backslash plus a markup character.
    #[regex(r"\\[\\*\[\]{}|#@+.-]")]
    Escape,

    #[regex(r"\r?\n")]
    Newline,

    #[token("**")]
    DoubleStar,

    #[token("*")]
    Star,

    #[token("[[")]
    LinkOpen,

    #[token("]]")]
    LinkClose,

    #[token("{{")]
    TransclusionOpen,

    #[token("}}")]
    TransclusionClose,

    #[token("||")]
    DoublePipe,

    #[token("|")]
    Pipe,

    #[regex(r"@@([^@\r\n]|@[^@\r\n])*@@")]
    Raw,

    /// Anything without a markup character in it.
    #[regex(r"[^\\*\[\]{}|@\r\n]+")]
    Text,
}

/// Lexemes only tried at the start of a line.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum LineStart {
    #[regex(r"#+[ \t]+")]
    Heading,

    #[regex(r"[ \t]*([-*+]|[0-9]+\.)[ \t]+")]
    Bullet,

    #[token("||")]
    Row,
}

/// A classified stretch of source, before it becomes a [`Token`].
#[derive(Debug, Clone, Copy)]
struct Piece {
    kind: TokenKind,
    start: usize,
    end: usize,
}

/// Lazy token stream over a source string.
#[derive(Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    lexer: logos::Lexer<'a, Inline>,
    line_start: bool,
    in_table_row: bool,
    pending: Option<Piece>,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: Inline::lexer(source),
            line_start: true,
            in_table_row: false,
            pending: None,
            finished: false,
        }
    }

    /// The source this tokenizer reads.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Pull the next classified piece straight from Logos.
    fn next_piece(&mut self) -> Option<Piece> {
        if std::mem::replace(&mut self.line_start, false)
            && let Some(piece) = self.probe_line_start()
        {
            return Some(piece);
        }

        let lexeme = self.lexer.next()?;
        let span = self.lexer.span();
        let piece = |kind| Piece {
            kind,
            start: span.start,
            end: span.end,
        };

        let kind = match lexeme {
            Ok(Inline::Escape) => {
                // Drop the backslash; the escaped character is ASCII.
                return Some(Piece {
                    kind: TokenKind::Text,
                    start: span.start + 1,
                    end: span.end,
                });
            }
            Ok(Inline::Newline) => {
                self.line_start = true;
                self.in_table_row = false;
                TokenKind::Newline
            }
            Ok(Inline::DoubleStar) => TokenKind::EmphasisMarker { strong: true },
            Ok(Inline::Star) => TokenKind::EmphasisMarker { strong: false },
            Ok(Inline::LinkOpen) => TokenKind::LinkOpen,
            Ok(Inline::LinkClose) => TokenKind::LinkClose,
            Ok(Inline::TransclusionOpen) => TokenKind::TransclusionOpen,
            Ok(Inline::TransclusionClose) => TokenKind::TransclusionClose,
            Ok(Inline::DoublePipe) if self.in_table_row => TokenKind::TableCellSeparator,
            Ok(Inline::DoublePipe) => TokenKind::Text,
            Ok(Inline::Pipe) => TokenKind::LinkSeparator,
            Ok(Inline::Raw) => TokenKind::RawText,
            Ok(Inline::Text) => TokenKind::Text,
            // Logos error means no lexeme matched - treat as TEXT
            Err(()) => TokenKind::Text,
        };

        Some(piece(kind))
    }

    /// Try the block-marker lexemes at the current position.
    fn probe_line_start(&mut self) -> Option<Piece> {
        let mut probe = self.lexer.clone().morph::<LineStart>();
        let Some(Ok(lexeme)) = probe.next() else {
            return None;
        };
        let span = probe.span();
        let text = &self.source[span.clone()];

        let kind = match lexeme {
            LineStart::Heading => {
                let hashes = text.bytes().take_while(|b| *b == b'#').count();
                TokenKind::HeadingMarker {
                    level: hashes.min(MAX_HEADING_LEVEL as usize) as u8,
                }
            }
            LineStart::Bullet => list_marker(text),
            LineStart::Row => {
                self.in_table_row = true;
                TokenKind::TableRowSeparator
            }
        };

        self.lexer = probe.morph();
        Some(Piece {
            kind,
            start: span.start,
            end: span.end,
        })
    }

    /// Extend a text piece over every contiguous text piece after it.
    fn coalesce(&mut self, mut piece: Piece) -> Piece {
        while let Some(next) = self.next_piece() {
            if next.kind == TokenKind::Text && next.start == piece.end {
                piece.end = next.end;
            } else {
                self.pending = Some(next);
                break;
            }
        }
        piece
    }
}

/// Work out level and kind of a bullet lexeme such as `"  - "` or `"12. "`.
fn list_marker(text: &str) -> TokenKind {
    let mut spaces = 0usize;
    let mut tabs = 0usize;
    for byte in text.bytes() {
        match byte {
            b' ' => spaces += 1,
            b'\t' => tabs += 1,
            _ => break,
        }
    }

    let marker = text.trim_start_matches([' ', '\t']);
    let ordered = marker.starts_with(|c: char| c.is_ascii_digit());
    let level = (1 + spaces / 2 + tabs).min(u8::MAX as usize) as u8;

    TokenKind::ListMarker { level, ordered }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }

        let piece = match self.pending.take().or_else(|| self.next_piece()) {
            Some(piece) => piece,
            None => {
                self.finished = true;
                return Some(Token::end_of_input());
            }
        };

        let piece = if piece.kind == TokenKind::Text {
            self.coalesce(piece)
        } else {
            piece
        };

        Some(Token::new(piece.kind, &self.source[piece.start..piece.end]))
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

/// Start a lazy token stream over `source`.
pub fn tokenize(source: &str) -> Tokenizer<'_> {
    Tokenizer::new(source)
}

/// Lex the whole input into a vector, `EndOfInput` included.
pub fn lex(source: &str) -> Vec<Token<'_>> {
    tokenize(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use TokenKind::*;

    fn token(kind: TokenKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    fn eoi() -> Token<'static> {
        Token::end_of_input()
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![eoi()]);
    }

    #[test]
    fn lex_plain_text_is_one_token() {
        assert_eq!(
            lex("hello, world 42 - #1"),
            vec![token(Text, "hello, world 42 - #1"), eoi()]
        );
    }

    #[test]
    fn lex_newline_lf_and_crlf() {
        assert_eq!(
            lex("a\nb\r\n"),
            vec![
                token(Text, "a"),
                token(Newline, "\n"),
                token(Text, "b"),
                token(Newline, "\r\n"),
                eoi(),
            ]
        );
    }

    #[rstest]
    #[case("# ", 1)]
    #[case("### ", 3)]
    #[case("###### ", 6)]
    #[case("######## ", 6)]
    fn heading_level_is_capped(#[case] marker: &str, #[case] level: u8) {
        let input = format!("{marker}Title");
        assert_eq!(
            lex(&input),
            vec![
                token(HeadingMarker { level }, marker),
                token(Text, "Title"),
                eoi()
            ]
        );
    }

    #[test]
    fn hash_without_space_is_text() {
        assert_eq!(lex("#tag"), vec![token(Text, "#tag"), eoi()]);
    }

    #[test]
    fn heading_marker_only_at_line_start() {
        assert_eq!(lex("a # b"), vec![token(Text, "a # b"), eoi()]);
    }

    #[rstest]
    #[case("- ", 1, false)]
    #[case("* ", 1, false)]
    #[case("+ ", 1, false)]
    #[case("  - ", 2, false)]
    #[case("    * ", 3, false)]
    #[case("\t- ", 2, false)]
    #[case("1. ", 1, true)]
    #[case("  12. ", 2, true)]
    fn list_markers(#[case] marker: &str, #[case] level: u8, #[case] ordered: bool) {
        let input = format!("{marker}item");
        assert_eq!(
            lex(&input),
            vec![
                token(ListMarker { level, ordered }, marker),
                token(Text, "item"),
                eoi()
            ]
        );
    }

    #[test]
    fn list_marker_only_at_line_start() {
        assert_eq!(lex("a - b"), vec![token(Text, "a - b"), eoi()]);
    }

    #[test]
    fn strong_at_line_start_is_not_a_list() {
        assert_eq!(
            lex("**bold**"),
            vec![
                token(EmphasisMarker { strong: true }, "**"),
                token(Text, "bold"),
                token(EmphasisMarker { strong: true }, "**"),
                eoi(),
            ]
        );
    }

    #[test]
    fn emphasis_followed_by_space() {
        assert_eq!(
            lex("*em* rest"),
            vec![
                token(EmphasisMarker { strong: false }, "*"),
                token(Text, "em"),
                token(EmphasisMarker { strong: false }, "*"),
                token(Text, " rest"),
                eoi(),
            ]
        );
    }

    #[test]
    fn link_with_label() {
        assert_eq!(
            lex("[[Cat/Name|label]]"),
            vec![
                token(LinkOpen, "[["),
                token(Text, "Cat/Name"),
                token(LinkSeparator, "|"),
                token(Text, "label"),
                token(LinkClose, "]]"),
                eoi(),
            ]
        );
    }

    #[test]
    fn transclusion() {
        assert_eq!(
            lex("{{Cat/Page}}"),
            vec![
                token(TransclusionOpen, "{{"),
                token(Text, "Cat/Page"),
                token(TransclusionClose, "}}"),
                eoi(),
            ]
        );
    }

    #[test]
    fn table_separators_depend_on_position() {
        assert_eq!(
            lex("||a||b||\nx||y"),
            vec![
                token(TableRowSeparator, "||"),
                token(Text, "a"),
                token(TableCellSeparator, "||"),
                token(Text, "b"),
                token(TableCellSeparator, "||"),
                token(Newline, "\n"),
                token(Text, "x||y"),
                eoi(),
            ]
        );
    }

    #[test]
    fn escape_yields_literal_character() {
        assert_eq!(
            lex(r"a\*b\*"),
            vec![token(Text, "a"), token(Text, "*b"), token(Text, "*"), eoi()]
        );
    }

    #[test]
    fn escape_at_line_start_blocks_heading() {
        assert_eq!(lex(r"\# not"), vec![token(Text, "# not"), eoi()]);
    }

    #[test]
    fn backslash_before_plain_char_is_kept() {
        assert_eq!(lex(r"C:\path"), vec![token(Text, r"C:\path"), eoi()]);
    }

    #[test]
    fn raw_text_keeps_delimiters() {
        assert_eq!(
            lex("x @@**y**@@ z"),
            vec![
                token(Text, "x "),
                token(RawText, "@@**y**@@"),
                token(Text, " z"),
                eoi(),
            ]
        );
    }

    #[test]
    fn stray_markup_characters_become_text() {
        assert_eq!(lex("a [ b } c @ d"), vec![token(Text, "a [ b } c @ d"), eoi()]);
    }

    #[test]
    fn exactly_one_end_of_input() {
        let mut tokens = tokenize("a\n");
        assert_eq!(tokens.by_ref().filter(|t| t.kind == EndOfInput).count(), 1);
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn restart_is_deterministic() {
        let input = "# H\n- a\n  - b\n||x||y||\n**s** [[L|l]] {{T}}";
        assert_eq!(lex(input), lex(input));

        let mut first = tokenize(input);
        first.next();
        let resumed = first.clone();
        assert_eq!(first.collect::<Vec<_>>(), resumed.collect::<Vec<_>>());
    }

    #[test]
    fn all_bytes_preserved_complex() {
        let input = "## Heading\n\nA *quote* with [[link]]\n\n- List item\n  - Nested\n1. one\n||a||b||\n{{X}} @@raw@@ ]] }} | tail";
        let reconstructed: String = lex(input).iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }

    #[test]
    fn no_empty_text_tokens() {
        let input = "**[[a|b]]**{{c}}\n\n||x||\n";
        assert!(
            lex(input)
                .iter()
                .all(|t| t.kind == EndOfInput || !t.text.is_empty())
        );
    }
}
