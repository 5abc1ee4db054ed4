use folio_syntax::{ArticleRef, Node, parse_with};

use crate::articles::ArticleSource;
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::render::{HtmlRenderer, RenderOptions, Rendered};

/// An article store plus the options to render its articles with.
#[derive(Debug, Clone)]
pub struct Wiki<S> {
    articles: S,
    options: RenderOptions,
}

impl<S: ArticleSource> Wiki<S> {
    pub fn new(articles: S) -> Self {
        Self::with_options(articles, RenderOptions::default())
    }

    pub fn with_options(articles: S, options: RenderOptions) -> Self {
        Self { articles, options }
    }

    pub fn articles(&self) -> &S {
        &self.articles
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Parse source into its document tree without rendering it.
    pub fn parse_tree(&self, source: &str) -> Node {
        parse_with(source, self.options.parse_options())
    }

    /// Render source to HTML.
    ///
    /// Without a context the source is rendered anonymously: transclusions
    /// still work, but nothing counts as the top-level article.
    pub fn render(&self, source: &str, context: Option<&RenderContext>) -> Rendered {
        let anonymous = RenderContext::anonymous();
        let context = context.unwrap_or(&anonymous);
        let document = self.parse_tree(source);

        if self.options.debug_tree && context.is_top_level() {
            match document.to_json() {
                Ok(json) => log::debug!("Document tree: {json}"),
                Err(e) => log::warn!("Failed to serialize document tree: {e}"),
            }
        }

        HtmlRenderer::new(&self.articles, self.options).render(&document, context)
    }

    /// Load an article from the store and render it as the page being viewed.
    pub fn render_article(&self, article: &ArticleRef) -> Result<Rendered, RenderError> {
        let source = self
            .articles
            .resolve(article)
            .map_err(|source| RenderError::Lookup {
                article: article.clone(),
                source,
            })?
            .ok_or_else(|| RenderError::NotFound(article.clone()))?;

        let context = RenderContext::for_article(article.clone());
        Ok(self.render(&source, Some(&context)))
    }
}

/// Render source with default options.
pub fn render_document<S: ArticleSource>(
    source: &str,
    context: Option<&RenderContext>,
    articles: S,
) -> Rendered {
    Wiki::new(articles).render(source, context)
}
