use anyhow::Context;
use folio_engine::RenderOptions;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file inside [`Config::config_dir`].
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read folio config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid folio config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `<category>/<name>.txt` article files.
    pub articles_path: PathBuf,
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
    #[serde(default = "default_max_transclusion_depth")]
    pub max_transclusion_depth: usize,
    /// Log each top-level article's parsed tree as JSON.
    #[serde(default)]
    pub debug_tree: bool,
}

fn default_max_nesting_depth() -> usize {
    RenderOptions::default().max_depth
}

fn default_max_transclusion_depth() -> usize {
    RenderOptions::default().max_transclusion_depth
}

impl Config {
    pub fn new(articles_path: impl Into<PathBuf>) -> Self {
        Self {
            articles_path: articles_path.into(),
            max_nesting_depth: default_max_nesting_depth(),
            max_transclusion_depth: default_max_transclusion_depth(),
            debug_tree: false,
        }
    }

    /// Read a config file. A file that doesn't exist is `Ok(None)`.
    ///
    /// `~` and `$VARS` in `articles_path` are expanded; a path that can't be
    /// expanded is kept as written.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(expanded) = Self::expand_path(&config.articles_path) {
            config.articles_path = expanded;
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating config directory {}", dir.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("writing folio config {}", path.display()))
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    /// `~/.config/folio`
    pub fn config_dir() -> PathBuf {
        PathBuf::from(shellexpand::tilde("~/.config/folio").into_owned())
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Render limits and switches taken from this config.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            max_depth: self.max_nesting_depth,
            max_transclusion_depth: self.max_transclusion_depth,
            debug_tree: self.debug_tree,
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        shellexpand::full(&path.to_string_lossy())
            .ok()
            .map(|expanded| PathBuf::from(expanded.into_owned()))
    }
}
