//! Content module - loads posts and their front-matter

mod frontmatter;
pub mod loader;
mod post;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::{load_posts, ContentLoader};
pub use post::Post;
