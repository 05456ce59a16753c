//! Error types for blog-index

use std::path::PathBuf;
use thiserror::Error;

use crate::content::FrontMatterError;

/// Errors raised while loading configuration or content
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read content directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front-matter in {path:?}: {reason}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        reason: FrontMatterError,
    },

    #[error("Invalid configuration in {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Error {
    /// The file or directory the error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            Error::ReadDir { path, .. }
            | Error::ReadFile { path, .. }
            | Error::FrontMatter { path, .. }
            | Error::Config { path, .. } => path,
        }
    }

    /// Whether the error came from a file's front-matter rather than from I/O
    pub fn is_front_matter(&self) -> bool {
        matches!(self, Error::FrontMatter { .. })
    }
}

/// Result type using the crate error
pub type Result<T> = std::result::Result<T, Error>;
