//! Render context: which article is being rendered, and on whose behalf.

use folio_syntax::ArticleRef;

/// Immutable description of where a render is happening.
///
/// A top-level render starts from [`RenderContext::for_article`]. Every
/// transclusion renders its target with [`RenderContext::enter`], which
/// returns a new context one level deeper; the parent is never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    source_article: Option<ArticleRef>,
    current_article: Option<ArticleRef>,
    ancestors: Vec<ArticleRef>,
    depth: usize,
}

impl RenderContext {
    /// Context for rendering `article` as the page being viewed.
    pub fn for_article(article: ArticleRef) -> Self {
        Self {
            source_article: Some(article.clone()),
            current_article: Some(article.clone()),
            ancestors: vec![article],
            depth: 0,
        }
    }

    /// Context with no article identity, for previews and ad-hoc source.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The article the top-level render started from.
    pub fn source_article(&self) -> Option<&ArticleRef> {
        self.source_article.as_ref()
    }

    /// The article whose source is currently being rendered.
    pub fn current_article(&self) -> Option<&ArticleRef> {
        self.current_article.as_ref()
    }

    /// Every article on the render chain, outermost first, current included.
    pub fn ancestors(&self) -> &[ArticleRef] {
        &self.ancestors
    }

    /// Context for rendering `target` transcluded into the current article.
    pub fn enter(&self, target: &ArticleRef) -> Self {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(target.clone());
        Self {
            source_article: self.source_article.clone(),
            current_article: Some(target.clone()),
            ancestors,
            depth: self.depth + 1,
        }
    }

    /// Whether this is the entry-point article rather than a transclusion.
    pub fn is_top_level(&self) -> bool {
        self.source_article.is_some() && self.source_article == self.current_article
    }

    /// Number of transclusions entered since the render started.
    ///
    /// Counted per [`RenderContext::enter`], so an anonymous render reaches
    /// the same depth as one started with [`RenderContext::for_article`].
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether `article` is already being rendered further up the chain.
    pub fn is_ancestor(&self, article: &ArticleRef) -> bool {
        self.ancestors.contains(article)
    }
}
