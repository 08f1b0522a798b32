/*
 * site.rs
 * Copyright (c) 2025 Quire contributors
 *
 * URL-to-document resolution for static builds.
 */

use quire_document::Document;
use quire_routing::Slugged;
use quire_schema::{Collection, CollectionKind};
use std::sync::Arc;

use crate::error::Result;
use crate::transformer::Transformer;

/// A URL resolved to its entry.
#[derive(Debug, Clone)]
pub struct ResolvedPage {
    pub collection: String,
    pub slug: String,
    pub document: Document,
}

/// Builds pages from URLs.
///
/// A `Site` keeps one [`Transformer`] for the whole build, so entries
/// shared between pages are resolved once.
pub struct Site {
    transformer: Transformer,
}

impl Site {
    pub fn new(transformer: Transformer) -> Self {
        Self { transformer }
    }

    pub fn transformer(&mut self) -> &mut Transformer {
        &mut self.transformer
    }

    /// Resolve a URL to a page.
    ///
    /// Collections are tried in declaration order. A collection whose
    /// template matches but which has no such entry does not end the
    /// search. In folder collections a path that misses its entry falls
    /// back to the folder's index entry, so every path from
    /// [`Site::list_all_paths`] resolves.
    pub async fn resolve(&mut self, path: &str) -> Result<Option<ResolvedPage>> {
        let registry = Arc::clone(self.transformer.registry());
        let router = Arc::clone(self.transformer.router());

        for collection in registry.collections() {
            let Some(matched) = router.match_path(&collection.name, path) else {
                continue;
            };
            tracing::debug!(path, collection = %collection.name, slug = %matched, "Path matched");

            for slug in candidate_slugs(collection, &matched) {
                if let Some(document) = self.transformer.try_load_entry(&collection.name, &slug).await? {
                    return Ok(Some(ResolvedPage {
                        collection: collection.name.clone(),
                        slug,
                        document,
                    }));
                }
            }
        }

        tracing::debug!(path, "No entry for path");
        Ok(None)
    }

    /// Every public path of the site, without preview fragments.
    ///
    /// Folder collections contribute one path per entry; files collections
    /// one per file with a template. Collections with previews disabled or
    /// without a template are skipped.
    pub async fn list_all_paths(&self) -> Result<Vec<String>> {
        let router = self.transformer.router();
        let loader = self.transformer.loader();
        let mut paths = Vec::new();

        for collection in router.registry().collections() {
            if !collection.preview {
                continue;
            }
            match &collection.kind {
                CollectionKind::Folder(_) => {
                    if collection.preview_path.is_none() {
                        continue;
                    }
                    for entry in loader.load_all(&collection.name).await? {
                        paths.push(router.path_for(&collection.name, entry.slug(), false)?);
                    }
                }
                CollectionKind::Files(files) => {
                    for file in files {
                        if collection.template_for(file.slug()).is_some() {
                            paths.push(router.path_for(&collection.name, file.slug(), false)?);
                        }
                    }
                }
            }
        }
        Ok(paths)
    }
}

/// Slugs to try for a matched path: the slug itself, then the index entry
/// of the folder it names.
fn candidate_slugs(collection: &Collection, slug: &str) -> Vec<String> {
    if !collection.is_folder() {
        return vec![slug.to_string()];
    }
    let index = collection.index_file();
    if slug.is_empty() {
        vec![index.to_string()]
    } else {
        vec![slug.to_string(), format!("{}/{}", slug, index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MemoryStore;
    use quire_routing::SlugRouter;
    use quire_schema::CollectionRegistry;
    use serde_json::json;

    const CONFIG: &str = r#"
collections:
  - name: posts
    preview_path: /posts/{{slug}}
    fields:
      - { name: title }
  - name: pages
    preview_path: "/{{slug}}"
    fields:
      - { name: title }
  - name: drafts
    preview_path: /drafts/{{slug}}
    editor: { preview: false }
    fields: []
  - name: authors
    fields: []
  - name: settings
    files:
      - { name: about, file: content/about.yml, preview_path: /about-us, fields: [{ name: title }] }
      - { name: nav, file: content/nav.yml, fields: [] }
"#;

    fn site() -> Site {
        let store = Arc::new(MemoryStore::new());
        store.insert("posts", "hello", Document::from(json!({ "title": "Hello" })));
        store.insert("pages", "contact", Document::from(json!({ "title": "Contact" })));
        store.insert("drafts", "wip", Document::from(json!({})));
        store.insert("authors", "jane", Document::from(json!({})));
        store.insert("settings", "about", Document::from(json!({ "title": "About" })));

        let registry = Arc::new(CollectionRegistry::from_yaml_str(CONFIG).unwrap());
        let router = Arc::new(SlugRouter::new(registry).unwrap());
        Site::new(Transformer::new(router, store))
    }

    #[test]
    fn test_resolve_falls_through_collections() {
        let mut site = site();
        // `/posts/hello` also matches `/{{slug}}` on pages, but posts wins.
        let page = pollster::block_on(site.resolve("/posts/hello")).unwrap().unwrap();
        assert_eq!(page.collection, "posts");
        assert_eq!(page.document.get("title").unwrap().as_str(), Some("Hello"));

        let page = pollster::block_on(site.resolve("/contact")).unwrap().unwrap();
        assert_eq!(page.collection, "pages");
        assert_eq!(page.slug, "contact");
    }

    #[test]
    fn test_resolve_files_collection() {
        let mut site = site();
        let page = pollster::block_on(site.resolve("/about-us")).unwrap();
        // pages matches `/about-us` first but has no such entry.
        let page = page.unwrap();
        assert_eq!(page.collection, "settings");
        assert_eq!(page.slug, "about");
    }

    #[test]
    fn test_resolve_unknown() {
        let mut site = site();
        assert!(pollster::block_on(site.resolve("/nothing/here")).unwrap().is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_index_entries() {
        let store = Arc::new(MemoryStore::new());
        store.insert("docs", "index", Document::from(json!({ "title": "Docs" })));
        store.insert("docs", "guide/index", Document::from(json!({ "title": "Guide" })));
        store.insert("docs", "guide/setup", Document::from(json!({ "title": "Setup" })));
        let registry = Arc::new(
            CollectionRegistry::from_yaml_str(
                "collections:\n  - { name: docs, preview_path: \"/docs/{{slug}}\", fields: [{ name: title }] }\n",
            )
            .unwrap(),
        );
        let router = Arc::new(SlugRouter::new(registry).unwrap());
        let mut site = Site::new(Transformer::new(router, store));

        let paths = pollster::block_on(site.list_all_paths()).unwrap();
        assert_eq!(paths, vec!["/docs/", "/docs/guide", "/docs/guide/setup"]);

        let resolved: Vec<_> = paths
            .iter()
            .map(|path| pollster::block_on(site.resolve(path)).unwrap().unwrap().slug)
            .collect();
        assert_eq!(resolved, vec!["index", "guide/index", "guide/setup"]);
    }

    #[test]
    fn test_list_all_paths() {
        let site = site();
        let paths = pollster::block_on(site.list_all_paths()).unwrap();
        assert_eq!(paths, vec!["/posts/hello", "/contact", "/about-us"]);
    }
}
