//! journal: a file-backed post repository for a markdown blog
//!
//! Posts live in `<posts_dir>/<slug>/INDEX.md`. Each index document carries
//! its metadata as JSON in a fenced code block tagged `meta`; the rest of
//! the document is the post body.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use content::{PostDetail, PostStore, PostSummary};
pub use error::PostError;

/// The main journal application
#[derive(Debug, Clone)]
pub struct Journal {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory containing one subdirectory per post
    pub posts_dir: PathBuf,
}

impl Journal {
    /// Create a new journal from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// Override the posts directory; relative paths resolve against the base directory
    pub fn with_posts_dir<P: AsRef<Path>>(mut self, posts_dir: P) -> Self {
        self.posts_dir = self.base_dir.join(posts_dir);
        self
    }

    /// A post store over the configured posts directory
    pub fn store(&self) -> PostStore {
        PostStore::new(&self.posts_dir)
    }
}
