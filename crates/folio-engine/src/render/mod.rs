//! # Rendering the Document Tree
//!
//! [`HtmlRenderer`] walks a parsed [`Node`](folio_syntax::Node) tree and
//! writes HTML. Most nodes map straight to an element; transclusions are
//! the exception, since they pull in other articles and depend on the
//! [`RenderContext`](crate::RenderContext) they are rendered in.
//!
//! A reference that can't be followed never aborts the render. It turns
//! into an inline placeholder and is recorded as a [`ReferenceProblem`] on
//! the [`Rendered`] result, so the caller can decide what to do about it.

mod html;

pub use html::HtmlRenderer;

use folio_syntax::{ArticleRef, ParseOptions};

use crate::error::{LookupError, RenderError};

/// Limits and switches for a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Nesting limit handed to the parser.
    pub max_depth: usize,
    /// How many transclusions deep a render may go.
    pub max_transclusion_depth: usize,
    /// Log the parsed tree as JSON for top-level renders.
    pub debug_tree: bool,
}

impl RenderOptions {
    pub const DEFAULT_MAX_TRANSCLUSION_DEPTH: usize = 8;

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.max_depth,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: ParseOptions::DEFAULT_MAX_DEPTH,
            max_transclusion_depth: Self::DEFAULT_MAX_TRANSCLUSION_DEPTH,
            debug_tree: false,
        }
    }
}

/// A reference that could not be rendered. Its message is what the
/// placeholder shows.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceProblem {
    #[error("Article not found: {0}")]
    NotFound(ArticleRef),
    #[error("Circular transclusion of {0}")]
    Cycle(ArticleRef),
    #[error("Transclusion of {0} nested too deep")]
    TooDeep(ArticleRef),
    #[error("Could not load {article}")]
    LookupFailed {
        article: ArticleRef,
        #[source]
        error: LookupError,
    },
}

impl ReferenceProblem {
    pub fn article(&self) -> &ArticleRef {
        match self {
            ReferenceProblem::NotFound(article)
            | ReferenceProblem::Cycle(article)
            | ReferenceProblem::TooDeep(article)
            | ReferenceProblem::LookupFailed { article, .. } => article,
        }
    }

    /// Whether the store failed, as opposed to the content being at fault.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, ReferenceProblem::LookupFailed { .. })
    }
}

/// Output of a render.
#[derive(Debug, Default)]
pub struct Rendered {
    pub html: String,
    pub problems: Vec<ReferenceProblem>,
}

impl Rendered {
    /// Rendered with no placeholders at all.
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// The HTML, unless a lookup failed along the way.
    ///
    /// Missing articles and cycles are content problems and still count as
    /// success; a failed lookup might succeed on retry, so it is an error.
    pub fn into_result(self) -> Result<String, RenderError> {
        for problem in self.problems {
            if let ReferenceProblem::LookupFailed { article, error } = problem {
                return Err(RenderError::Lookup {
                    article,
                    source: error,
                });
            }
        }
        Ok(self.html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn into_result_ignores_content_problems() {
        let rendered = Rendered {
            html: "<p>x</p>".to_string(),
            problems: vec![
                ReferenceProblem::NotFound(ArticleRef::named("A")),
                ReferenceProblem::Cycle(ArticleRef::named("B")),
            ],
        };
        assert!(!rendered.is_clean());
        assert_eq!(rendered.into_result().unwrap(), "<p>x</p>");
    }

    #[test]
    fn into_result_surfaces_lookup_failure() {
        let rendered = Rendered {
            html: String::new(),
            problems: vec![
                ReferenceProblem::NotFound(ArticleRef::named("A")),
                ReferenceProblem::LookupFailed {
                    article: ArticleRef::new("Cat", "B"),
                    error: LookupError::Unavailable("offline".to_string()),
                },
            ],
        };

        let err = rendered.into_result().unwrap_err();
        assert!(matches!(
            &err,
            RenderError::Lookup { article, .. } if *article == ArticleRef::new("Cat", "B")
        ));
        assert_eq!(
            err.to_string(),
            "Lookup of Cat/B failed: Article store unavailable: offline"
        );
    }

    #[test]
    fn problem_messages() {
        assert_eq!(
            ReferenceProblem::NotFound(ArticleRef::new("Cat", "Missing")).to_string(),
            "Article not found: Cat/Missing"
        );
        assert_eq!(
            ReferenceProblem::Cycle(ArticleRef::named("A")).to_string(),
            "Circular transclusion of A"
        );
    }

    #[test]
    fn default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.max_depth, 32);
        assert_eq!(options.max_transclusion_depth, 8);
        assert!(!options.debug_tree);
        assert_eq!(options.parse_options().max_depth, 32);
    }
}
