//! Post record model

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

use super::frontmatter::{parse_date_string, FrontMatter};

/// Characters escaped when a slug becomes a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A blog post as handed to the renderer
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Rendering key, fresh on every load
    pub id: Uuid,

    /// Post title
    pub title: String,

    /// URL-friendly name used for the post link
    pub slug: String,

    /// Publication date as written in the front-matter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,

    /// Source file path
    #[serde(skip)]
    pub source: PathBuf,
}

impl Post {
    /// Build a record from parsed front-matter, assigning a new id
    pub fn new(front_matter: FrontMatter, source: PathBuf) -> Self {
        let FrontMatter {
            title,
            slug,
            date,
            mut extra,
        } = front_matter;

        // The generated id always wins over one written in the file
        if extra.shift_remove("id").is_some() {
            tracing::debug!("Replacing front-matter id in {:?}", source);
        }

        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            date,
            extra,
            source,
        }
    }

    /// Link path for this post under `prefix`
    pub fn link(&self, prefix: &str) -> String {
        format!(
            "{}/{}",
            prefix.trim_end_matches('/'),
            utf8_percent_encode(&self.slug, PATH_SEGMENT)
        )
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}
