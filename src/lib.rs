//! blog-index: loads markdown posts for a blog index page
//!
//! Posts are read from a content directory, their front-matter is parsed
//! into typed records, and each record gets a fresh id before it is handed
//! to whatever renders the index.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;

pub use content::{load_posts, ContentLoader, FrontMatter, FrontMatterError, Post};
pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// Name of the optional site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// A blog site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory scanned for posts
    pub content_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Point the site at a different content directory
    pub fn with_content_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.content_dir = self.base_dir.join(dir);
        self
    }

    /// Load all posts using the site configuration
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        ContentLoader::from_blog(self).load_posts()
    }
}
