use crate::articles::ArticleSource;
use crate::error::LookupError;
use folio_syntax::ArticleRef;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary articles directory
pub fn create_test_articles_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create an article file at `<dir>/<category>/<name>.txt`
pub fn create_test_article(dir: &TempDir, category: &str, name: &str, content: &str) -> PathBuf {
    let category_dir = dir.path().join(category);
    fs::create_dir_all(&category_dir).unwrap();
    let file_path = category_dir.join(format!("{name}.txt"));
    fs::write(&file_path, content).unwrap();
    file_path
}

/// A store that can never answer.
pub struct UnavailableArticles;

impl ArticleSource for UnavailableArticles {
    fn resolve(&self, _article: &ArticleRef) -> Result<Option<String>, LookupError> {
        Err(LookupError::Unavailable("store offline".to_string()))
    }
}
