//! Looking up article source by reference.

use std::collections::HashMap;

use folio_syntax::ArticleRef;

use crate::error::LookupError;

/// Where transcluded articles come from.
///
/// `Ok(None)` means the article does not exist. `Err` means the store could
/// not tell; the renderer reports the two differently.
pub trait ArticleSource {
    fn resolve(&self, article: &ArticleRef) -> Result<Option<String>, LookupError>;
}

impl<T: ArticleSource + ?Sized> ArticleSource for &T {
    fn resolve(&self, article: &ArticleRef) -> Result<Option<String>, LookupError> {
        (**self).resolve(article)
    }
}

impl<T: ArticleSource + ?Sized> ArticleSource for Box<T> {
    fn resolve(&self, article: &ArticleRef) -> Result<Option<String>, LookupError> {
        (**self).resolve(article)
    }
}

/// Articles held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryArticles {
    articles: HashMap<ArticleRef, String>,
}

impl MemoryArticles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an article, returning the previous source.
    pub fn insert(&mut self, article: ArticleRef, source: impl Into<String>) -> Option<String> {
        self.articles.insert(article, source.into())
    }

    /// Builder-style [`MemoryArticles::insert`].
    pub fn with(mut self, article: ArticleRef, source: impl Into<String>) -> Self {
        self.insert(article, source);
        self
    }

    pub fn contains(&self, article: &ArticleRef) -> bool {
        self.articles.contains_key(article)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(ArticleRef, S)> for MemoryArticles {
    fn from_iter<I: IntoIterator<Item = (ArticleRef, S)>>(iter: I) -> Self {
        Self {
            articles: iter
                .into_iter()
                .map(|(article, source)| (article, source.into()))
                .collect(),
        }
    }
}

impl ArticleSource for MemoryArticles {
    fn resolve(&self, article: &ArticleRef) -> Result<Option<String>, LookupError> {
        Ok(self.articles.get(article).cloned())
    }
}
