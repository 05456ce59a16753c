//! Initialize a new blog site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# blog-index configuration

# Heading printed by `blog-index list`
title: Blog list

# Directory scanned for posts, relative to this file
content_dir: contents
# File-name suffix a post must end with
extension: md
# What to do with a post whose front-matter is broken: abort | skip
on_error: abort

# Prefix for post links
link_prefix: /blog/

# File name for `blog-index new` (:slug, :year, :month, :day)
new_post_name: :slug.md
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("Already initialized: {:?} exists", config_path);
    }

    let content_dir = target_dir.join("contents");
    fs::create_dir_all(&content_dir)
        .with_context(|| format!("Failed to create {:?}", content_dir))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
slug: hello-world
date: {}
---

Welcome! This is your very first post. Add more markdown files to
`contents/`, each starting with a front-matter block that sets at least
`title` and `slug`.

```bash
$ blog-index new "My New Post"
$ blog-index list
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    let sample_path = content_dir.join("hello-world.md");
    if !sample_path.exists() {
        fs::write(&sample_path, sample_post)?;
    }

    Ok(())
}
