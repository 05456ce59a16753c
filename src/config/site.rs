//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// What to do when a post's front-matter cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Fail the whole load
    #[default]
    Abort,
    /// Leave the file out and log a warning
    Skip,
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,

    // Content
    pub content_dir: String,
    pub extension: String,
    pub on_error: ErrorPolicy,

    // Links
    pub link_prefix: String,

    // Writing
    pub new_post_name: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog list".to_string(),
            content_dir: "contents".to_string(),
            extension: "md".to_string(),
            on_error: ErrorPolicy::Abort,
            link_prefix: "/blog/".to_string(),
            new_post_name: ":slug.md".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file or one holding only comments means "all defaults"
        if content.lines().all(|l| {
            let l = l.trim();
            l.is_empty() || l.starts_with('#')
        }) {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// File-name suffix a content file must end with, including the dot
    pub fn extension_suffix(&self) -> String {
        extension_suffix(&self.extension)
    }
}

/// `md`, `.md` -> `.md`
pub(crate) fn extension_suffix(extension: &str) -> String {
    format!(".{}", extension.trim_start_matches('.'))
}
