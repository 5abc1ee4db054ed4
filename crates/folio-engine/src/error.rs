use folio_syntax::ArticleRef;
use std::path::PathBuf;

/// An article store could not answer a lookup.
///
/// This is different from the article not existing, which stores report as
/// `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Article store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Lookup of {article} failed: {source}")]
    Lookup {
        article: ArticleRef,
        source: LookupError,
    },
    #[error("Article not found: {0}")]
    NotFound(ArticleRef),
}
