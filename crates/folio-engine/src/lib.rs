//! # folio-engine
//!
//! Renders folio wiki markup to HTML.
//!
//! The engine sits on top of [`folio_syntax`]: it parses source into a
//! document tree, then walks the tree with an [`HtmlRenderer`]. Links and
//! transclusions name other articles by [`ArticleRef`]; transclusions are
//! resolved through an [`ArticleSource`] while rendering.
//!
//! ```
//! use folio_engine::{ArticleRef, MemoryArticles, RenderContext, Wiki};
//!
//! let articles = MemoryArticles::new()
//!     .with(ArticleRef::new("Help", "Intro"), "# Intro\n{{Help/Footer}}")
//!     .with(ArticleRef::new("Help", "Footer"), "*thanks*");
//!
//! let wiki = Wiki::new(articles);
//! let rendered = wiki.render_article(&ArticleRef::new("Help", "Intro")).unwrap();
//! assert_eq!(rendered.html, "<h1>Intro</h1>\n<p><em>thanks</em></p>");
//! ```

pub mod articles;
pub mod context;
pub mod error;
pub mod io;
pub mod render;
mod wiki;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use articles::{ArticleSource, MemoryArticles};
pub use context::RenderContext;
pub use error::{LookupError, RenderError};
pub use folio_syntax::{ArticleRef, Node, parse, tokenize};
pub use io::DirectoryArticles;
pub use render::{HtmlRenderer, ReferenceProblem, RenderOptions, Rendered};
pub use wiki::{Wiki, render_document};
