//! CLI entry point for blog-index

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_index::{commands, Blog};

#[derive(Parser)]
#[command(name = "blog-index")]
#[command(version)]
#[command(about = "Loads markdown posts and their front-matter for a blog index page", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Scan this directory for posts instead of the configured one
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug for the post (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List posts
    #[command(alias = "ls")]
    List,

    /// Write the posts as JSON for the page renderer
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_index=debug,info"
    } else {
        "blog_index=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let open_blog = || -> Result<Blog> {
        let blog = Blog::new(&base_dir)?;
        Ok(match &cli.content_dir {
            Some(dir) => blog.with_content_dir(dir),
            None => blog,
        })
    };

    match cli.command {
        Commands::Init { ref folder } => {
            let target_dir = if folder.is_absolute() {
                folder.clone()
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { ref title, ref slug } => {
            let blog = open_blog()?;
            let path = commands::new::create_post(&blog, title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::List => {
            let blog = open_blog()?;
            commands::list::run(&blog)?;
        }

        Commands::Export {
            ref output,
            pretty,
        } => {
            let blog = open_blog()?;
            commands::export::run(&blog, output.as_deref(), pretty)?;
        }

        Commands::Version => {
            println!("blog-index version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
