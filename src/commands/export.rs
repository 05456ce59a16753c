//! Export posts as JSON for the page renderer

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::content::Post;
use crate::Blog;

/// Props document handed to the index page
#[derive(Debug, Serialize)]
pub struct IndexProps<'a> {
    pub blogs: &'a [Post],
}

/// Serialize posts into the `{"blogs": [...]}` document
pub fn to_json(posts: &[Post], pretty: bool) -> Result<String> {
    let props = IndexProps { blogs: posts };
    let json = if pretty {
        serde_json::to_string_pretty(&props)?
    } else {
        serde_json::to_string(&props)?
    };
    Ok(json)
}

/// Load posts and write them to `output`, or stdout when none is given
pub fn run(blog: &Blog, output: Option<&Path>, pretty: bool) -> Result<()> {
    let posts = blog.load_posts()?;
    let json = to_json(&posts, pretty)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Wrote {} posts to {:?}", posts.len(), path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
