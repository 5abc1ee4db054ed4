use crate::articles::ArticleSource;
use crate::error::LookupError;
use folio_syntax::ArticleRef;
use relative_path::RelativePathBuf;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of article source files.
pub const ARTICLE_EXTENSION: &str = "txt";

/// Articles stored as `<root>/<category>/<name>.txt`.
#[derive(Debug, Clone)]
pub struct DirectoryArticles {
    root: PathBuf,
}

impl DirectoryArticles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Like [`DirectoryArticles::new`], but the directory must exist.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, LookupError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(LookupError::Unavailable(format!(
                "articles directory does not exist: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an article relative to the root.
    ///
    /// `None` when the category or name could escape its directory.
    pub fn relative_path(article: &ArticleRef) -> Option<RelativePathBuf> {
        if !is_plain_segment(&article.category) || !is_plain_segment(&article.name) {
            return None;
        }
        Some(RelativePathBuf::from(format!(
            "{}/{}.{ARTICLE_EXTENSION}",
            article.category, article.name
        )))
    }

    /// Write an article's source, creating its category directory.
    pub fn write(&self, article: &ArticleRef, source: &str) -> Result<(), LookupError> {
        let relative = Self::relative_path(article).ok_or_else(|| {
            LookupError::Unavailable(format!("invalid article name: {article}"))
        })?;
        let path = relative.to_path(&self.root);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| LookupError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, source).map_err(|source| LookupError::Io { path, source })
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(['/', '\\', '\0']) && !segment.contains("..")
}

impl ArticleSource for DirectoryArticles {
    fn resolve(&self, article: &ArticleRef) -> Result<Option<String>, LookupError> {
        let Some(relative) = Self::relative_path(article) else {
            log::debug!("Refusing to look up unsafe article name {article}");
            return Ok(None);
        };
        let path = relative.to_path(&self.root);
        log::trace!("Reading {}", path.display());

        match fs::read_to_string(&path) {
            Ok(source) => Ok(Some(source)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LookupError::Io { path, source }),
        }
    }
}
