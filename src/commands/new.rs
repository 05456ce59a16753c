//! Create a new post

use anyhow::Result;
use indexmap::IndexMap;
use std::fs;
use std::path::PathBuf;

use crate::content::FrontMatter;
use crate::Blog;

/// Create a new post in the content directory, returning its path
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.trim().is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}, pass one with --slug", title);
    }
    // Posts live directly in the content directory
    if slug.chars().any(std::path::is_separator) || slug == "." || slug == ".." {
        anyhow::bail!("Slug {:?} must not contain path separators", slug);
    }

    let filename = blog
        .config
        .new_post_name
        .replace(":slug", &slug)
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());

    fs::create_dir_all(&blog.content_dir)?;
    let file_path = blog.content_dir.join(filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let front_matter = FrontMatter {
        title: title.to_string(),
        slug,
        date: Some(now.format("%Y-%m-%d %H:%M:%S").to_string()),
        extra: IndexMap::new(),
    };
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&front_matter)?);

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}
