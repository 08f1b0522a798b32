//! Paths command - list every public path of the site

use std::path::Path;

use anyhow::Result;
use quire_transform::{Site, Transformer};

pub fn execute(config: &Path, content: &Path) -> Result<()> {
    let router = super::load_router(config)?;
    let store = super::load_store(content)?;
    let site = Site::new(Transformer::new(router, store));

    for path in pollster::block_on(site.list_all_paths())? {
        println!("{}", path);
    }
    Ok(())
}
