//! List posts

use anyhow::Result;
use std::fmt::Write;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::Blog;

/// Print every post with its link and id
pub fn run(blog: &Blog) -> Result<()> {
    let posts = blog.load_posts()?;
    print!("{}", format_listing(&blog.config, &posts));
    Ok(())
}

/// Format posts as one line each, in load order
pub fn format_listing(config: &SiteConfig, posts: &[Post]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}):", config.title, posts.len());
    for post in posts {
        let date = post
            .parse_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let _ = writeln!(
            out,
            "  {}  {} -> {} [{}]",
            date,
            post.title,
            post.link(&config.link_prefix),
            post.id
        );
    }
    out
}
