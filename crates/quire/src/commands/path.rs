//! Path command - print the public path of an entry

use std::path::Path;

use anyhow::Result;

pub fn execute(config: &Path, collection: &str, slug: &str, preview: bool) -> Result<()> {
    let router = super::load_router(config)?;
    println!("{}", router.path_for(collection, slug, preview)?);
    Ok(())
}
