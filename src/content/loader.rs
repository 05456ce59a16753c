//! Content loader - loads posts from the content directory

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::{FrontMatter, Post};
use crate::config::{extension_suffix, ErrorPolicy};
use crate::error::{Error, Result};
use crate::Blog;

/// Loads posts from a single content directory
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
    suffix: String,
    on_error: ErrorPolicy,
}

impl ContentLoader {
    /// Create a loader for `.md` files that aborts on bad front-matter
    pub fn new<P: Into<PathBuf>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.into(),
            suffix: ".md".to_string(),
            on_error: ErrorPolicy::Abort,
        }
    }

    /// Create a loader configured from a site
    pub fn from_blog(blog: &Blog) -> Self {
        Self {
            content_dir: blog.content_dir.clone(),
            suffix: blog.config.extension_suffix(),
            on_error: blog.config.on_error,
        }
    }

    /// Only load files whose name ends with `.{extension}`
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.suffix = extension_suffix(extension);
        self
    }

    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    /// Load every post in the content directory, in directory-listing order
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let read_dir_err = |source: std::io::Error| Error::ReadDir {
            path: self.content_dir.clone(),
            source,
        };

        let mut posts = Vec::new();
        let mut slugs = HashSet::new();

        for entry in fs::read_dir(&self.content_dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let path = entry.path();

            if !is_content_file(&entry.file_name().to_string_lossy(), &self.suffix) {
                continue;
            }
            if path.is_dir() {
                tracing::debug!("Skipping directory {:?}", path);
                continue;
            }

            let post = match self.load_post(&path) {
                Ok(post) => post,
                Err(e) if e.is_front_matter() && self.on_error == ErrorPolicy::Skip => {
                    tracing::warn!("Skipping post: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !slugs.insert(post.slug.clone()) {
                tracing::warn!(
                    "Duplicate slug {:?} in {:?}, links will collide",
                    post.slug,
                    path
                );
            }

            tracing::debug!("Loaded post {:?} from {:?}", post.slug, path);
            posts.push(post);
        }

        tracing::info!(
            "Loaded {} posts from {:?}",
            posts.len(),
            self.content_dir
        );

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        // The body is not needed for the index
        let (fm, _body) = FrontMatter::parse(&content).map_err(|reason| Error::FrontMatter {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(Post::new(fm, path.to_path_buf()))
    }
}

/// Load all `.md` posts from `content_dir`, aborting on the first bad file
pub fn load_posts<P: AsRef<Path>>(content_dir: P) -> Result<Vec<Post>> {
    ContentLoader::new(content_dir.as_ref()).load_posts()
}

/// Check if a directory entry name qualifies as a content file
fn is_content_file(name: &str, suffix: &str) -> bool {
    name.ends_with(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    fn post_md(title: &str, slug: &str) -> String {
        format!(
            "---\ntitle: \"{}\"\nslug: \"{}\"\ndate: 2024-01-15\n---\n\n# {}\n\nBody text.\n",
            title, slug, title
        )
    }

    #[test]
    fn test_one_record_per_file_with_unique_ids() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "a.md", &post_md("A", "a"));
        write(&dir, "b.md", &post_md("B", "b"));
        write(&dir, "c.md", &post_md("C", "c"));

        let posts = load_posts(dir.path()).unwrap();
        assert_eq!(posts.len(), 3);

        let ids: HashSet<_> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(posts.iter().all(|p| !p.id.to_string().is_empty()));
    }

    #[test]
    fn test_non_markdown_files_excluded() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "a.md", &post_md("A", "a"));
        write(&dir, "b.txt", &post_md("B", "b"));
        write(&dir, "c.md.bak", &post_md("C", "c"));
        write(&dir, "D.MD", &post_md("D", "d"));

        let posts = load_posts(dir.path()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "a");
    }

    #[test]
    fn test_front_matter_preserved_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir,
            "hello.md",
            "---\ntitle: \"Hello\"\nslug: \"hello\"\nauthor: Ana\n---\nHi there\n",
        );

        let posts = load_posts(dir.path()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello");
        assert_eq!(posts[0].slug, "hello");
        assert_eq!(
            posts[0].extra.get("author"),
            Some(&serde_yaml::Value::from("Ana"))
        );
        assert_eq!(posts[0].source, dir.path().join("hello.md"));
    }

    #[test]
    fn test_reload_gives_same_fields_new_ids() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "a.md", &post_md("A", "a"));
        write(&dir, "b.md", &post_md("B", "b"));

        let first = load_posts(dir.path()).unwrap();
        let second = load_posts(dir.path()).unwrap();
        assert_eq!(first.len(), second.len());

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.title, b.title);
            assert_eq!(a.slug, b.slug);
            assert_eq!(a.date, b.date);
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let posts = load_posts(dir.path()).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_malformed_front_matter_aborts_load() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "good.md", &post_md("Good", "good"));
        write(&dir, "bad.md", "Just some markdown, no metadata at all.\n");

        let err = load_posts(dir.path()).unwrap_err();
        assert!(err.is_front_matter());
        assert_eq!(err.path(), &dir.path().join("bad.md"));
    }

    #[test]
    fn test_skip_policy_excludes_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "good.md", &post_md("Good", "good"));
        write(&dir, "bad.md", "---\ntitle: no slug here\n---\n");

        let posts = ContentLoader::new(dir.path())
            .with_error_policy(ErrorPolicy::Skip)
            .load_posts()
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = load_posts(&missing).unwrap_err();
        assert!(matches!(err, Error::ReadDir { .. }));
        assert_eq!(err.path(), &missing);
    }

    #[test]
    fn test_file_instead_of_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "a.md", &post_md("A", "a"));

        let err = load_posts(dir.path().join("a.md")).unwrap_err();
        assert!(matches!(err, Error::ReadDir { .. }));
    }

    #[test]
    fn test_skip_policy_still_fails_on_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("binary.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = ContentLoader::new(dir.path())
            .with_error_policy(ErrorPolicy::Skip)
            .load_posts()
            .unwrap_err();
        assert!(matches!(err, Error::ReadFile { .. }));
    }

    #[test]
    fn test_directory_with_markdown_name_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("drafts.md")).unwrap();
        write(&dir, "a.md", &post_md("A", "a"));

        let posts = load_posts(dir.path()).unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/deep.md"), post_md("Deep", "deep")).unwrap();

        let posts = load_posts(dir.path()).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_order_follows_directory_listing() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta", "alpha", "mid", "beta"] {
            write(&dir, &format!("{}.md", name), &post_md(name, name));
        }

        let listed: Vec<PathBuf> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        let loaded: Vec<PathBuf> = load_posts(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.source)
            .collect();
        assert_eq!(loaded, listed);
    }

    #[test]
    fn test_custom_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "a.md", &post_md("A", "a"));
        write(&dir, "b.markdown", &post_md("B", "b"));

        let posts = ContentLoader::new(dir.path())
            .with_extension("markdown")
            .load_posts()
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "b");

        let dotted = ContentLoader::new(dir.path())
            .with_extension(".markdown")
            .load_posts()
            .unwrap();
        assert_eq!(dotted.len(), 1);
    }

    #[test]
    fn test_numeric_key_does_not_fail_load() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "a.md", "---\ntitle: A\nslug: a\n2024: recap\n---\n");

        let posts = load_posts(dir.path()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(
            posts[0].extra.get("2024"),
            Some(&serde_yaml::Value::from("recap"))
        );
    }

    #[test]
    fn test_duplicate_slugs_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "one.md", &post_md("One", "same"));
        write(&dir, "two.md", &post_md("Two", "same"));

        let posts = load_posts(dir.path()).unwrap();
        assert_eq!(posts.len(), 2);
        assert_ne!(posts[0].id, posts[1].id);
    }
}
