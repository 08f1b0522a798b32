//! Resolve command - print a render-ready document as JSON

use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::info;

use quire_transform::{Site, TransformOptions, Transformer};

/// Arguments for the resolve command
#[derive(Debug)]
pub struct ResolveArgs {
    pub config: PathBuf,
    pub content: PathBuf,
    /// A public path, or `<collection>/<slug>` when `entry` is set
    pub target: String,
    pub entry: bool,
    pub preview: bool,
    pub max_depth: Option<usize>,
}

pub fn execute(args: ResolveArgs) -> Result<()> {
    let router = super::load_router(&args.config)?;
    let store = super::load_store(&args.content)?;

    let mut options = TransformOptions {
        preview: args.preview,
        ..TransformOptions::default()
    };
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }
    let mut transformer = Transformer::new(router, store).with_options(options);

    let document = if args.entry {
        let Some((collection, slug)) = args.target.split_once('/') else {
            bail!("Expected <collection>/<slug>, got '{}'", args.target);
        };
        pollster::block_on(transformer.load_entry(collection, slug))?
    } else {
        let mut site = Site::new(transformer);
        let Some(page) = pollster::block_on(site.resolve(&args.target))? else {
            bail!("No entry found for path '{}'", args.target);
        };
        info!(collection = %page.collection, slug = %page.slug, "Resolved");
        page.document
    };

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
