//! Match command - map a public path back to its entry

use std::path::Path;

use anyhow::{Result, bail};
use quire_routing::RouteMatch;

pub fn execute(config: &Path, path: &str, collection: Option<&str>) -> Result<()> {
    let router = super::load_router(config)?;

    let matched = match collection {
        Some(collection) => router.match_path(collection, path).map(|slug| RouteMatch {
            collection: collection.to_string(),
            slug,
        }),
        None => router.resolve(path),
    };

    match matched {
        Some(RouteMatch { collection, slug }) => {
            println!("{}\t{}", collection, slug);
            Ok(())
        }
        None => bail!("No collection matches path '{}'", path),
    }
}
