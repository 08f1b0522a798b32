//! Quire CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "quire")]
#[command(version)]
#[command(about = "Quire content CLI", long_about = None)]
struct Cli {
    /// CMS configuration file
    #[arg(short, long, global = true, default_value = "cms.yml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the public path of an entry
    Path {
        /// Collection name
        collection: String,

        /// Entry slug
        slug: String,

        /// Append the preview fragment
        #[arg(long)]
        preview: bool,
    },

    /// Match a public path back to its collection and slug
    Match {
        /// Public path, e.g. /posts/hello
        path: String,

        /// Only try this collection
        #[arg(long)]
        collection: Option<String>,
    },

    /// Resolve an entry or a public path into a render-ready document
    Resolve {
        /// Public path, or `<collection>/<slug>` with --entry
        target: String,

        /// Content bundle (JSON or YAML): collection -> slug -> entry
        #[arg(long)]
        content: PathBuf,

        /// Treat the target as `<collection>/<slug>` instead of a path
        #[arg(long)]
        entry: bool,

        /// Generate preview links
        #[arg(long)]
        preview: bool,

        /// Maximum nesting and relation depth
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// List every public path of the site
    Paths {
        /// Content bundle (JSON or YAML): collection -> slug -> entry
        #[arg(long)]
        content: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quire=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Path {
            collection,
            slug,
            preview,
        } => commands::path::execute(&cli.config, &collection, &slug, preview),
        Commands::Match { path, collection } => {
            commands::match_cmd::execute(&cli.config, &path, collection.as_deref())
        }
        Commands::Resolve {
            target,
            content,
            entry,
            preview,
            max_depth,
        } => commands::resolve::execute(commands::resolve::ResolveArgs {
            config: cli.config,
            content,
            target,
            entry,
            preview,
            max_depth,
        }),
        Commands::Paths { content } => commands::paths::execute(&cli.config, &content),
    }
}
